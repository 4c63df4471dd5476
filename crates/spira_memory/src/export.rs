//! On-demand journal export as delimited text.

use spira_core::JournalEntry;

const HEADER: &str = "timestamp,input_text,mood,spiral_level,pattern,emotion,response_type,response";

/// Render history rows as CSV: one row per entry plus the companion response
/// it was answered with. Responses are not persisted, so rows sourced from
/// disk carry an empty response field.
///
/// Fields containing commas, quotes, or newlines are quoted per RFC 4180.
pub fn to_csv<'a, I>(rows: I) -> String
where
    I: IntoIterator<Item = (&'a JournalEntry, &'a str)>,
{
    let mut out = String::from(HEADER);
    out.push('\n');
    for (entry, response) in rows {
        let row = [
            escape(&entry.timestamp),
            escape(&entry.input_text),
            escape(&entry.mood),
            entry.spiral_level.to_string(),
            escape(entry.pattern.as_label()),
            escape(&entry.emotion),
            escape(entry.response_type.as_str()),
            escape(response),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spira_core::{ResponseMode, SpiralPattern};

    fn entry(text: &str) -> JournalEntry {
        JournalEntry {
            timestamp: "2026-08-24 10:30".to_string(),
            input_text: text.to_string(),
            mood: "🌧️ Sad".to_string(),
            spiral_level: 7,
            pattern: SpiralPattern::SelfDoubt,
            emotion: r#"{"joy":0.0,"sadness":1.0,"anger":0.0,"fear":0.0,"guilt":0.0}"#.to_string(),
            response_type: ResponseMode::ToughLove,
        }
    }

    #[test]
    fn test_column_set_is_pinned() {
        let rows: [(&JournalEntry, &str); 0] = [];
        assert_eq!(
            to_csv(rows),
            "timestamp,input_text,mood,spiral_level,pattern,emotion,response_type,response\n"
        );
    }

    #[test]
    fn test_header_and_row_count() {
        let one = entry("one");
        let two = entry("two");
        let csv = to_csv([(&one, "r1"), (&two, "r2")]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
    }

    #[test]
    fn test_response_column_round_trips_text() {
        let e = entry("x");
        let csv = to_csv([(&e, "That feeling is valid, truly.")]);
        assert!(csv
            .lines()
            .nth(1)
            .unwrap()
            .ends_with("That feeling is valid, truly."));
    }

    #[test]
    fn test_restored_entry_has_empty_response_field() {
        let e = entry("x");
        let csv = to_csv([(&e, "")]);
        assert!(csv.lines().nth(1).unwrap().ends_with("tough_love,"));
    }

    #[test]
    fn test_quotes_embedded_commas_and_quotes() {
        let e = entry(r#"I said "why me", again"#);
        let csv = to_csv([(&e, "")]);
        assert!(csv.contains(r#""I said ""why me"", again""#));
    }

    #[test]
    fn test_quotes_multiline_input() {
        let e = entry("first line\nsecond line");
        let csv = to_csv([(&e, "")]);
        assert!(csv.contains("\"first line\nsecond line\""));
    }

    #[test]
    fn test_quoted_response_with_comma() {
        let e = entry("x");
        let csv = to_csv([(&e, "Breathe, slowly.")]);
        assert!(csv.contains(r#""Breathe, slowly.""#));
    }

    #[test]
    fn test_emotion_json_is_quoted() {
        // The serialized vector contains commas, so it must be quoted.
        let e = entry("x");
        let csv = to_csv([(&e, "")]);
        assert!(csv.contains(r#""{""joy"":0.0"#));
    }
}
