use crate::ledger::DisplayRecord;
use crate::model::{FieldSet, OutputFormat, OutputSpec, Payload};

pub mod generate;
pub mod history;
pub mod replay;

#[cfg(test)]
pub(crate) mod test_support;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// What a generation produced.
#[derive(Debug, Clone)]
pub struct Generated {
    pub output: OutputSpec,
    pub payload: Payload,
    pub history_index: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub generated: Option<Generated>,
    pub history: Vec<DisplayRecord>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_generated(mut self, generated: Generated) -> Self {
        self.generated = Some(generated);
        self
    }

    pub fn with_history(mut self, records: Vec<DisplayRecord>) -> Self {
        self.history = records;
        self
    }
}

/// Everything a generation needs: the raw fields, where to write, and an
/// optional format override.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub fields: FieldSet,
    pub output: String,
    pub format: Option<OutputFormat>,
}

impl GenerateRequest {
    pub fn new(fields: FieldSet, output: impl Into<String>) -> Self {
        Self {
            fields,
            output: output.into(),
            format: None,
        }
    }

    pub fn with_format(mut self, format: Option<OutputFormat>) -> Self {
        self.format = format;
        self
    }
}
