//! Rebuilds the literal `qr ...` invocation for a set of fields.
//!
//! The stored form carries every value so an entry can be copied back into a
//! shell. [`Mode::Masked`] swaps sensitive values for [`MASK`] and is what
//! history listings show.

use crate::model::{FieldKind, FieldSet, OutputFormat};

pub const MASK: &str = "****";

const SHELL_SPECIAL: &[char] = &[
    '"', '\'', '\\', '$', '`', ';', '&', '|', '<', '>', '(', ')', '*', '?', '#', '!',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Plain,
    Masked,
}

pub fn render(fields: &FieldSet, output: &str, format: Option<OutputFormat>, mode: Mode) -> String {
    let content_type = fields.content_type();
    let mut parts = vec!["qr".to_string(), content_type.as_str().to_string()];

    for spec in content_type.schema() {
        let Some(value) = fields.get(spec.name) else {
            continue;
        };
        let shown = if mode == Mode::Masked && spec.sensitive {
            MASK.to_string()
        } else {
            quote(value)
        };
        match spec.kind {
            FieldKind::Positional => parts.push(shown),
            FieldKind::Option => parts.push(format!("--{} {}", spec.name, shown)),
            FieldKind::Flag => {
                if fields.flag(spec.name) {
                    parts.push(format!("--{}", spec.name));
                }
            }
        }
    }

    parts.push(format!("--output {}", quote(output)));
    if let Some(format) = format {
        parts.push(format!("--format {}", format));
    }
    parts.join(" ")
}

/// Double-quotes values a shell would otherwise split or drop.
fn quote(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || SHELL_SPECIAL.contains(&c));
    if !needs_quotes {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentType;

    #[test]
    fn url_command() {
        let fields = FieldSet::new(ContentType::Url).with("url", "https://example.com");
        assert_eq!(
            render(&fields, "test.png", None, Mode::Plain),
            "qr url https://example.com --output test.png"
        );
    }

    #[test]
    fn quotes_values_with_spaces_and_specials() {
        let fields = FieldSet::new(ContentType::Text).with("text", "say \"hi\" & go");
        assert_eq!(
            render(&fields, "my codes/a.svg", Some(OutputFormat::Svg), Mode::Plain),
            r#"qr text "say \"hi\" & go" --output "my codes/a.svg" --format svg"#
        );
    }

    #[test]
    fn wifi_password_masked_only_in_masked_mode() {
        let fields = FieldSet::new(ContentType::Wifi)
            .with("ssid", "Home Net")
            .with("password", "s3cret")
            .with("security", "WPA2")
            .with_flag("hidden", true);

        assert_eq!(
            render(&fields, "wifi.png", None, Mode::Plain),
            "qr wifi --ssid \"Home Net\" --password s3cret --security WPA2 --hidden --output wifi.png"
        );
        let masked = render(&fields, "wifi.png", None, Mode::Masked);
        assert!(masked.contains("--password ****"));
        assert!(!masked.contains("s3cret"));
    }

    #[test]
    fn empty_values_are_kept_visible() {
        let fields = FieldSet::new(ContentType::Wifi)
            .with("ssid", "Test")
            .with("password", "");
        assert_eq!(
            render(&fields, "a.png", None, Mode::Plain),
            "qr wifi --ssid Test --password \"\" --output a.png"
        );
    }

    #[test]
    fn fields_follow_schema_order() {
        let fields = FieldSet::new(ContentType::Email)
            .with("body", "b")
            .with("address", "a@example.com")
            .with("subject", "s");
        assert_eq!(
            render(&fields, "e.png", None, Mode::Plain),
            "qr email a@example.com --subject s --body b --output e.png"
        );
    }
}
