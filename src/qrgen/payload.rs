//! Payload builders: one per content type, turning validated [`Content`] into
//! the canonical string that gets encoded. Building cannot fail; every
//! failure mode lives in [`crate::validate`].

use crate::model::{ContactCard, Content, EmailMessage, Payload, SmsMessage, WifiCredentials};

pub fn build(content: &Content) -> Payload {
    let text = match content {
        Content::Url(url) => url.clone(),
        Content::Text(text) => text.clone(),
        Content::Wifi(creds) => wifi(creds),
        Content::VCard(card) => vcard(card),
        Content::Email(message) => mailto(message),
        Content::Sms(message) => sms(message),
    };
    Payload::new(text)
}

/// `WIFI:T:<security>;S:<ssid>;P:<password>;[H:true;];`
fn wifi(creds: &WifiCredentials) -> String {
    let password = creds.password.as_deref().unwrap_or("");
    let mut out = format!(
        "WIFI:T:{};S:{};P:{};",
        creds.security,
        escape_wifi(&creds.ssid),
        escape_wifi(password)
    );
    if creds.hidden {
        out.push_str("H:true;");
    }
    out.push(';');
    out
}

fn escape_wifi(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ';' | ':' | ',' | '"') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn vcard(card: &ContactCard) -> String {
    let mut lines = vec![
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("FN:{}", card.name),
    ];
    let optional = [
        ("TEL", &card.phone),
        ("EMAIL", &card.email),
        ("ORG", &card.organization),
        ("TITLE", &card.title),
        ("URL", &card.url),
    ];
    for (key, value) in optional {
        if let Some(value) = value {
            lines.push(format!("{}:{}", key, value));
        }
    }
    lines.push("END:VCARD".to_string());
    lines.join("\n")
}

fn mailto(message: &EmailMessage) -> String {
    let params = [
        ("subject", &message.subject),
        ("body", &message.body),
        ("cc", &message.cc),
        ("bcc", &message.bcc),
    ];
    let query: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(|v| format!("{}={}", key, percent_encode(v)))
        })
        .collect();

    if query.is_empty() {
        format!("mailto:{}", message.address)
    } else {
        format!("mailto:{}?{}", message.address, query.join("&"))
    }
}

fn sms(message: &SmsMessage) -> String {
    match &message.message {
        Some(body) => format!("sms:{}?body={}", message.phone, encode(body, b"/")),
        None => format!("sms:{}", message.phone),
    }
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
pub fn percent_encode(value: &str) -> String {
    encode(value, b"")
}

/// Like [`percent_encode`], but leaves the bytes in `keep` as they are.
fn encode(value: &str, keep: &[u8]) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            b if keep.contains(&b) => out.push(b as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
