use crate::error::{QrError, Result};
use crate::model::{OutputFormat, Payload};
use crate::render::Renderer;
use std::cell::RefCell;

/// Records what it was asked to encode and returns the payload bytes.
#[derive(Default)]
pub struct StubRenderer {
    pub calls: RefCell<Vec<(String, OutputFormat)>>,
    pub fail: bool,
}

impl StubRenderer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl Renderer for StubRenderer {
    fn encode(&self, payload: &Payload, format: OutputFormat) -> Result<Vec<u8>> {
        self.calls
            .borrow_mut()
            .push((payload.as_str().to_string(), format));
        if self.fail {
            return Err(QrError::Encoding("data too long".into()));
        }
        Ok(payload.as_str().as_bytes().to_vec())
    }
}
