use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// The kind of content encoded into a QR symbol. Selects the validator and
/// builder pair used for a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Url,
    Text,
    Wifi,
    VCard,
    Email,
    Sms,
}

/// How a field appears on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Positional,
    Option,
    Flag,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Masked whenever the field is displayed.
    pub sensitive: bool,
}

const fn positional(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Positional,
        sensitive: false,
    }
}

const fn option(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Option,
        sensitive: false,
    }
}

const URL_FIELDS: &[FieldSpec] = &[positional("url")];
const TEXT_FIELDS: &[FieldSpec] = &[positional("text")];
const WIFI_FIELDS: &[FieldSpec] = &[
    option("ssid"),
    FieldSpec {
        name: "password",
        kind: FieldKind::Option,
        sensitive: true,
    },
    option("security"),
    FieldSpec {
        name: "hidden",
        kind: FieldKind::Flag,
        sensitive: false,
    },
];
const VCARD_FIELDS: &[FieldSpec] = &[
    option("name"),
    option("phone"),
    option("email"),
    option("org"),
    option("title"),
    option("url"),
];
const EMAIL_FIELDS: &[FieldSpec] = &[
    positional("address"),
    option("subject"),
    option("body"),
    option("cc"),
    option("bcc"),
];
const SMS_FIELDS: &[FieldSpec] = &[positional("phone"), option("message")];

impl ContentType {
    pub const ALL: [ContentType; 6] = [
        ContentType::Url,
        ContentType::Text,
        ContentType::Wifi,
        ContentType::VCard,
        ContentType::Email,
        ContentType::Sms,
    ];

    /// Subcommand name, also used in the ledger.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Url => "url",
            ContentType::Text => "text",
            ContentType::Wifi => "wifi",
            ContentType::VCard => "vcard",
            ContentType::Email => "email",
            ContentType::Sms => "sms",
        }
    }

    /// Fields accepted by this content type, in command-line order.
    pub fn schema(&self) -> &'static [FieldSpec] {
        match self {
            ContentType::Url => URL_FIELDS,
            ContentType::Text => TEXT_FIELDS,
            ContentType::Wifi => WIFI_FIELDS,
            ContentType::VCard => VCARD_FIELDS,
            ContentType::Email => EMAIL_FIELDS,
            ContentType::Sms => SMS_FIELDS,
        }
    }

    pub fn is_sensitive(&self, field: &str) -> bool {
        self.schema()
            .iter()
            .any(|spec| spec.sensitive && spec.name == field)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw, unvalidated field values as submitted by the user.
///
/// Absent optional fields are simply missing from the map. Flags are stored
/// as `"true"` when set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    content_type: ContentType,
    values: BTreeMap<String, String>,
}

impl FieldSet {
    pub fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            values: BTreeMap::new(),
        }
    }

    pub fn from_values(content_type: ContentType, values: BTreeMap<String, String>) -> Self {
        Self {
            content_type,
            values,
        }
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.values.insert(name.to_string(), value.into());
        self
    }

    pub fn with_opt(self, name: &str, value: Option<String>) -> Self {
        match value {
            Some(v) => self.with(name, v),
            None => self,
        }
    }

    pub fn with_flag(self, name: &str, set: bool) -> Self {
        if set {
            self.with(name, "true")
        } else {
            self
        }
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn flag(&self, name: &str) -> bool {
        matches!(self.get(name), Some("true"))
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

/// WiFi authentication mode as written into the `T:` segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityMode {
    Wpa,
    Wpa2,
    Wpa3,
    Wep,
    NoPass,
}

impl SecurityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityMode::Wpa => "WPA",
            SecurityMode::Wpa2 => "WPA2",
            SecurityMode::Wpa3 => "WPA3",
            SecurityMode::Wep => "WEP",
            SecurityMode::NoPass => "nopass",
        }
    }

    pub fn requires_password(&self) -> bool {
        !matches!(self, SecurityMode::NoPass)
    }
}

impl fmt::Display for SecurityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiCredentials {
    pub ssid: String,
    /// Always `None` for [`SecurityMode::NoPass`].
    pub password: Option<String>,
    pub security: SecurityMode,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactCard {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub organization: Option<String>,
    pub title: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub address: String,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub cc: Option<String>,
    pub bcc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsMessage {
    pub phone: String,
    pub message: Option<String>,
}

/// Validated, normalized content. Only produced by `validate::validate_fields`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Url(String),
    Text(String),
    Wifi(WifiCredentials),
    VCard(ContactCard),
    Email(EmailMessage),
    Sms(SmsMessage),
}

impl Content {
    pub fn content_type(&self) -> ContentType {
        match self {
            Content::Url(_) => ContentType::Url,
            Content::Text(_) => ContentType::Text,
            Content::Wifi(_) => ContentType::Wifi,
            Content::VCard(_) => ContentType::VCard,
            Content::Email(_) => ContentType::Email,
            Content::Sms(_) => ContentType::Sms,
        }
    }
}

/// The exact string encoded into the QR symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload(String);

impl Payload {
    pub(crate) fn new(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }

    /// Matches a file extension (without the dot), ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "svg" => Some(OutputFormat::Svg),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::from_extension(s).ok_or_else(|| format!("Unknown output format: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    pub path: PathBuf,
    pub format: OutputFormat,
}

/// One successful generation, as persisted in the ledger.
///
/// Secret fields are stored in the clear so a record can be replayed;
/// masking happens only when records are listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub index: usize,
    pub timestamp: DateTime<Utc>,
    pub content_type: ContentType,
    pub raw_command: String,
    pub fields: BTreeMap<String, String>,
    pub output: String,
    pub format: OutputFormat,
}

impl HistoryRecord {
    pub fn field_set(&self) -> FieldSet {
        FieldSet::from_values(self.content_type, self.fields.clone())
    }
}

/// A record that has not yet been given its ledger index.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub timestamp: DateTime<Utc>,
    pub content_type: ContentType,
    pub raw_command: String,
    pub fields: BTreeMap<String, String>,
    pub output: String,
    pub format: OutputFormat,
}

impl NewRecord {
    pub fn into_record(self, index: usize) -> HistoryRecord {
        HistoryRecord {
            index,
            timestamp: self.timestamp,
            content_type: self.content_type,
            raw_command: self.raw_command,
            fields: self.fields,
            output: self.output,
            format: self.format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_serializes_lowercase() {
        let json = serde_json::to_string(&ContentType::VCard).unwrap();
        assert_eq!(json, "\"vcard\"");
        let parsed: ContentType = serde_json::from_str("\"wifi\"").unwrap();
        assert_eq!(parsed, ContentType::Wifi);
    }

    #[test]
    fn only_wifi_password_is_sensitive() {
        for ct in ContentType::ALL {
            for spec in ct.schema() {
                let expected = ct == ContentType::Wifi && spec.name == "password";
                assert_eq!(ct.is_sensitive(spec.name), expected, "{} {}", ct, spec.name);
            }
        }
    }

    #[test]
    fn field_set_skips_absent_options_and_unset_flags() {
        let fields = FieldSet::new(ContentType::Wifi)
            .with("ssid", "Home")
            .with_opt("password", None)
            .with_flag("hidden", false);
        assert_eq!(fields.values().len(), 1);
        assert!(!fields.flag("hidden"));
        assert_eq!(fields.get("ssid"), Some("Home"));
    }

    #[test]
    fn output_format_from_extension_ignores_case() {
        assert_eq!(OutputFormat::from_extension("PNG"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_extension("Svg"), Some(OutputFormat::Svg));
        assert_eq!(OutputFormat::from_extension("jpg"), None);
        assert_eq!("svg".parse::<OutputFormat>(), Ok(OutputFormat::Svg));
    }

    #[test]
    fn history_record_uses_camel_case_keys() {
        let record = NewRecord {
            timestamp: Utc::now(),
            content_type: ContentType::Url,
            raw_command: "qr url \"https://example.com\" --output a.png".into(),
            fields: BTreeMap::from([("url".to_string(), "https://example.com".to_string())]),
            output: "a.png".into(),
            format: OutputFormat::Png,
        }
        .into_record(1);

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["index"], 1);
        assert_eq!(json["contentType"], "url");
        assert!(json["rawCommand"].as_str().unwrap().starts_with("qr url"));
        assert_eq!(json["format"], "png");
    }
}
