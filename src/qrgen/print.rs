use chrono::Local;
use colored::Colorize;
use qrgen::api::{CmdMessage, MessageLevel};
use qrgen::ledger::DisplayRecord;

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

pub(crate) fn print_history(records: &[DisplayRecord]) {
    if records.is_empty() {
        return;
    }
    println!(
        "{}",
        format!("QR Code Generation History ({} entries):", records.len()).bold()
    );
    println!();
    for record in records {
        println!("{}", format_entry(record));
        println!();
    }
}

fn format_entry(record: &DisplayRecord) -> String {
    let when = record
        .timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S");
    format!(
        "{} {} - {}\n    {}",
        format!("[{}]", record.index).yellow(),
        when,
        record.content_type,
        record.command.dimmed()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use qrgen::model::{ContentType, OutputFormat};
    use std::collections::BTreeMap;

    #[test]
    fn entry_shows_index_type_and_command() {
        colored::control::set_override(false);
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap();
        let record = DisplayRecord {
            index: 4,
            timestamp,
            content_type: ContentType::Wifi,
            command: "qr wifi --ssid Home --password **** --output w.png".into(),
            fields: BTreeMap::new(),
            output: "w.png".into(),
            format: OutputFormat::Png,
        };

        let local = timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        assert_eq!(
            format_entry(&record),
            format!(
                "[4] {} - wifi\n    qr wifi --ssid Home --password **** --output w.png",
                local
            )
        );
    }
}
