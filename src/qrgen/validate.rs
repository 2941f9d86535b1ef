//! # Field Validation
//!
//! Every value a user supplies passes through here before a payload is built.
//! Validators are pure (apart from the output-path probe) and return either a
//! normalized value or a [`ValidationError`] whose message is shown verbatim.
//!
//! [`validate_fields`] dispatches on the [`ContentType`] of a [`FieldSet`] and
//! produces the matching [`Content`] variant; payload builders only ever see
//! its output.

use crate::error::{PathError, ValidationError};
use crate::model::{
    ContactCard, Content, ContentType, EmailMessage, FieldSet, OutputFormat, SecurityMode,
    SmsMessage, WifiCredentials,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const MAX_SSID_CHARS: usize = 32;
pub const MAX_TEXT_CHARS: usize = 4000;

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?i)https?://(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)*|\[[0-9a-f:.]+\])(?::\d{1,5})?(?:[/?#]\S*)?$",
    )
    .expect("URL pattern is valid")
});

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is valid")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?\d{7,15}$").expect("phone pattern is valid"));

pub fn validate_url(url: &str) -> Result<String, ValidationError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    if !URL_RE.is_match(url) {
        return Err(ValidationError::InvalidUrl(url.to_string()));
    }
    Ok(url.to_string())
}

pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidEmail(email.to_string()));
    }
    Ok(email.to_string())
}

/// Validates a comma-separated recipient list, normalizing the separators.
pub fn validate_recipients(list: &str) -> Result<String, ValidationError> {
    let addresses = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(validate_email)
        .collect::<Result<Vec<_>, _>>()?;
    if addresses.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    Ok(addresses.join(","))
}

/// Strips spaces, dashes, dots and parentheses, then expects an optional
/// leading `+` followed by 7 to 15 digits.
pub fn validate_phone(phone: &str) -> Result<String, ValidationError> {
    if phone.trim().is_empty() {
        return Err(ValidationError::EmptyPhone);
    }
    let normalized: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '.' | '(' | ')'))
        .collect();
    if !PHONE_RE.is_match(&normalized) {
        return Err(ValidationError::InvalidPhone(phone.to_string()));
    }
    Ok(normalized)
}

pub fn validate_security(security: &str) -> Result<SecurityMode, ValidationError> {
    match security.trim().to_ascii_uppercase().as_str() {
        "WPA" => Ok(SecurityMode::Wpa),
        "WPA2" => Ok(SecurityMode::Wpa2),
        "WPA3" => Ok(SecurityMode::Wpa3),
        "WEP" => Ok(SecurityMode::Wep),
        "NOPASS" => Ok(SecurityMode::NoPass),
        _ => Err(ValidationError::InvalidSecurity(security.to_string())),
    }
}

/// Surrounding spaces are part of the network name and are kept.
pub fn validate_ssid(ssid: &str) -> Result<String, ValidationError> {
    if ssid.trim().is_empty() {
        return Err(ValidationError::EmptySsid);
    }
    let len = ssid.chars().count();
    if len > MAX_SSID_CHARS {
        return Err(ValidationError::SsidTooLong(len));
    }
    Ok(ssid.to_string())
}

/// A missing security mode means WPA. The password is dropped for open
/// networks and required for every other mode.
pub fn validate_wifi(
    ssid: &str,
    password: Option<&str>,
    security: Option<&str>,
    hidden: bool,
) -> Result<WifiCredentials, ValidationError> {
    let ssid = validate_ssid(ssid)?;
    let security = match security {
        Some(s) => validate_security(s)?,
        None => SecurityMode::Wpa,
    };

    let password = if security.requires_password() {
        match password {
            Some(p) if !p.is_empty() => Some(p.to_string()),
            _ => return Err(ValidationError::PasswordRequired(security)),
        }
    } else {
        None
    };

    Ok(WifiCredentials {
        ssid,
        password,
        security,
        hidden,
    })
}

pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    Ok(name.to_string())
}

pub fn validate_text(text: &str) -> Result<String, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::EmptyText);
    }
    let len = text.chars().count();
    if len > MAX_TEXT_CHARS {
        return Err(ValidationError::TextTooLong(len));
    }
    Ok(text.to_string())
}

/// Checks the extension and that the parent directory exists and accepts
/// new files. Nothing is left behind in the directory afterwards.
pub fn validate_output_path(output: &str) -> Result<PathBuf, PathError> {
    if output.trim().is_empty() {
        return Err(PathError::Missing);
    }

    let path = PathBuf::from(output);
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if OutputFormat::from_extension(ext).is_none() {
        let suffix = if ext.is_empty() {
            String::new()
        } else {
            format!(".{}", ext.to_lowercase())
        };
        return Err(PathError::InvalidExtension(suffix));
    }

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !parent.is_dir() {
        return Err(PathError::DirectoryMissing(parent));
    }
    if !is_writable(&parent) {
        return Err(PathError::DirectoryNotWritable(parent));
    }

    Ok(path)
}

fn is_writable(dir: &Path) -> bool {
    let probe = dir.join(format!(".qr-probe-{}", Uuid::new_v4()));
    match OpenOptions::new().write(true).create_new(true).open(&probe) {
        Ok(file) => {
            drop(file);
            let _ = fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}

/// Trimmed value of an optional field; blank counts as absent.
fn optional(fields: &FieldSet, name: &str) -> Option<String> {
    fields
        .get(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn required<'a>(fields: &'a FieldSet, name: &str) -> &'a str {
    fields.get(name).unwrap_or("")
}

/// Validates every field of `fields` according to its content type.
pub fn validate_fields(fields: &FieldSet) -> Result<Content, ValidationError> {
    match fields.content_type() {
        ContentType::Url => Ok(Content::Url(validate_url(required(fields, "url"))?)),
        ContentType::Text => Ok(Content::Text(validate_text(required(fields, "text"))?)),
        ContentType::Wifi => Ok(Content::Wifi(validate_wifi(
            required(fields, "ssid"),
            fields.get("password"),
            fields.get("security"),
            fields.flag("hidden"),
        )?)),
        ContentType::VCard => {
            let name = validate_name(required(fields, "name"))?;
            let phone = optional(fields, "phone")
                .map(|p| validate_phone(&p))
                .transpose()?;
            let email = optional(fields, "email")
                .map(|e| validate_email(&e))
                .transpose()?;
            let url = optional(fields, "url")
                .map(|u| validate_url(&u))
                .transpose()?;
            Ok(Content::VCard(ContactCard {
                name,
                phone,
                email,
                organization: optional(fields, "org"),
                title: optional(fields, "title"),
                url,
            }))
        }
        ContentType::Email => {
            let address = validate_email(required(fields, "address"))?;
            let cc = optional(fields, "cc")
                .map(|l| validate_recipients(&l))
                .transpose()?;
            let bcc = optional(fields, "bcc")
                .map(|l| validate_recipients(&l))
                .transpose()?;
            Ok(Content::Email(EmailMessage {
                address,
                subject: optional(fields, "subject"),
                body: optional(fields, "body"),
                cc,
                bcc,
            }))
        }
        ContentType::Sms => Ok(Content::Sms(SmsMessage {
            phone: validate_phone(required(fields, "phone"))?,
            message: optional(fields, "message"),
        })),
    }
}
