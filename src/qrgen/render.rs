//! # Renderer Boundary
//!
//! Turning a payload into pixels or paths is delegated to the `qrcode` crate.
//! The rest of the crate only sees the [`Renderer`] trait, so command logic can
//! be exercised with a stub that never touches an encoder.

use crate::error::{QrError, Result};
use crate::model::{OutputFormat, Payload};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::render::svg;
use qrcode::QrCode;
use std::io::Cursor;

pub trait Renderer {
    /// Encode `payload` as a complete PNG or SVG document.
    fn encode(&self, payload: &Payload, format: OutputFormat) -> Result<Vec<u8>>;
}

/// Production renderer, with the encoder's default version and error
/// correction selection.
#[derive(Debug, Clone)]
pub struct QrCodeRenderer {
    module_size: u32,
    quiet_zone: bool,
}

impl Default for QrCodeRenderer {
    fn default() -> Self {
        Self {
            module_size: 10,
            quiet_zone: true,
        }
    }
}

impl QrCodeRenderer {
    pub fn new(module_size: u32, quiet_zone: bool) -> Self {
        Self {
            module_size: module_size.max(1),
            quiet_zone,
        }
    }
}

impl Renderer for QrCodeRenderer {
    fn encode(&self, payload: &Payload, format: OutputFormat) -> Result<Vec<u8>> {
        let code = QrCode::new(payload.as_str().as_bytes())
            .map_err(|e| QrError::Encoding(e.to_string()))?;

        match format {
            OutputFormat::Png => {
                let img = code
                    .render::<Luma<u8>>()
                    .quiet_zone(self.quiet_zone)
                    .module_dimensions(self.module_size, self.module_size)
                    .build();
                let mut bytes = Vec::new();
                DynamicImage::ImageLuma8(img)
                    .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
                    .map_err(|e| QrError::Encoding(e.to_string()))?;
                Ok(bytes)
            }
            OutputFormat::Svg => {
                let doc = code
                    .render::<svg::Color<'_>>()
                    .quiet_zone(self.quiet_zone)
                    .module_dimensions(self.module_size, self.module_size)
                    .dark_color(svg::Color("#000000"))
                    .light_color(svg::Color("#ffffff"))
                    .build();
                Ok(doc.into_bytes())
            }
        }
    }
}
