use crate::error::PathError;
use crate::model::OutputFormat;
use std::path::Path;

/// Picks the encoding for an output file.
///
/// An explicit format always wins, even when it disagrees with the path's
/// extension; the path is used as given. Otherwise the extension decides.
pub fn resolve(path: &Path, explicit: Option<OutputFormat>) -> Result<OutputFormat, PathError> {
    if let Some(format) = explicit {
        return Ok(format);
    }
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    OutputFormat::from_extension(ext).ok_or_else(|| {
        let suffix = if ext.is_empty() {
            String::new()
        } else {
            format!(".{}", ext.to_lowercase())
        };
        PathError::InvalidExtension(suffix)
    })
}
