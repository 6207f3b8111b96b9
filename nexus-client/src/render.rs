//! Plain-text rendering of transcript lines for the terminal front-end.

use chrono::{DateTime, Local, TimeZone};
use nexus_types::{Message, Role};

fn label(role: Role) -> &'static str {
    match role {
        Role::User => "DU",
        Role::Assistant => "NEXUS AI",
        Role::System => "SYSTEM",
        Role::Error => "FEHLER",
    }
}

/// `HH:MM:SS LABEL │ text`, with continuation lines indented under the text.
pub fn format_message_in<Tz: TimeZone>(message: &Message, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let time: DateTime<Tz> = message.timestamp.with_timezone(tz);
    let prefix = format!("{} {:>8} │ ", time.format("%H:%M:%S"), label(message.role));
    let indent = format!("{:>width$}", "│ ", width = prefix.chars().count());
    let mut out = String::new();
    for (i, line) in message.text.lines().enumerate() {
        if i == 0 {
            out.push_str(&prefix);
        } else {
            out.push('\n');
            out.push_str(&indent);
        }
        out.push_str(line);
    }
    if out.is_empty() {
        out.push_str(&prefix);
    }
    out
}

pub fn format_message(message: &Message) -> String {
    format_message_in(message, &Local)
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at_noon(mut message: Message) -> Message {
        message.timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap();
        message
    }

    #[test]
    fn single_line_has_time_and_label() {
        let line = format_message_in(&at_noon(Message::assistant("Hallo!")), &Utc);
        assert_eq!(line, "12:30:05 NEXUS AI │ Hallo!");
    }

    #[test]
    fn continuation_lines_are_aligned() {
        let line = format_message_in(&at_noon(Message::error("eins\nzwei")), &Utc);
        let rows: Vec<&str> = line.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].ends_with("FEHLER │ eins"));
        assert!(rows[1].ends_with("│ zwei"));
        assert_eq!(rows[0].find('│'), rows[1].find('│'));
    }
}
