use crate::model::SecurityMode;
use std::path::PathBuf;
use thiserror::Error;

/// A bad field value. The rendered message is shown to the user verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("URL cannot be empty")]
    EmptyUrl,

    #[error("Invalid URL format: '{0}'. URL must be a valid http:// or https:// address.")]
    InvalidUrl(String),

    #[error("Email address cannot be empty")]
    EmptyEmail,

    #[error("Invalid email format: '{0}'. Please provide a valid email address (e.g., user@example.com).")]
    InvalidEmail(String),

    #[error("Phone number cannot be empty")]
    EmptyPhone,

    #[error("Invalid phone number format: '{0}'. Phone number should contain 7-15 digits, optionally starting with +.")]
    InvalidPhone(String),

    #[error("WiFi SSID cannot be empty")]
    EmptySsid,

    #[error("WiFi SSID too long ({0} chars). Maximum is 32 characters.")]
    SsidTooLong(usize),

    #[error("Invalid WiFi security type: '{0}'. Must be one of: WPA, WPA2, WPA3, WEP, nopass.")]
    InvalidSecurity(String),

    #[error("Password is required for {0} security. Use --security nopass for open networks.")]
    PasswordRequired(SecurityMode),

    #[error("Name is required for vCard. Use --name to specify the contact name.")]
    NameRequired,

    #[error("Text cannot be empty")]
    EmptyText,

    #[error("Text too long ({0} chars). Maximum recommended length is 4000 characters for reliable scanning.")]
    TextTooLong(usize),
}

/// A bad or unusable output location, detected before any encoding work.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Output path is required. Use --output to specify the file path.")]
    Missing,

    #[error("Invalid output format: '{0}'. Output file must have .png or .svg extension.")]
    InvalidExtension(String),

    #[error("Output directory does not exist: '{}'. Please create the directory first or choose a different path.", .0.display())]
    DirectoryMissing(PathBuf),

    #[error("Output directory is not writable: '{}'. Please check permissions or choose a different path.", .0.display())]
    DirectoryNotWritable(PathBuf),
}

#[derive(Error, Debug)]
pub enum QrError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Path(#[from] PathError),

    #[error("Failed to encode QR code: {0}")]
    Encoding(String),

    #[error("Failed to write QR code to '{}': {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write history to '{}': {source}", .path.display())]
    LedgerWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No history entry with index {0}")]
    HistoryNotFound(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, QrError>;
