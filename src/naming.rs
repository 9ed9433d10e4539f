//! Artifact file naming.

use chrono::{DateTime, TimeZone};

/// Timestamp layout used in artifact names.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Build `<label>-<YYYYMMDD-HHmmss>.<ext>` for an exported document.
///
/// Characters that are unsafe in file names are replaced with `_`, and an
/// empty label becomes `document`.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use mdpage::naming::artifact_filename;
///
/// let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
/// assert_eq!(artifact_filename("chat", "pdf", &at), "chat-20240309-140507.pdf");
/// ```
pub fn artifact_filename<Tz>(label: &str, ext: &str, timestamp: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let label = sanitize_label(label);
    let stamp = timestamp.format(TIMESTAMP_FORMAT);
    let ext = ext.trim_start_matches('.');
    if ext.is_empty() {
        format!("{}-{}", label, stamp)
    } else {
        format!("{}-{}.{}", label, stamp, ext)
    }
}

fn sanitize_label(label: &str) -> String {
    let cleaned: String = label
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c if c.is_whitespace() => '-',
            c => c,
        })
        .collect();

    if cleaned.is_empty() {
        "document".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_filename_format() {
        let at = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 1).unwrap();
        assert_eq!(
            artifact_filename("export", "json", &at),
            "export-20251231-235901.json"
        );
    }

    #[test]
    fn test_local_offset_is_kept() {
        let tz = FixedOffset::east_opt(9 * 3600).unwrap();
        let at = tz.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(artifact_filename("a", ".pdf", &at), "a-20250102-030405.pdf");
    }

    #[test]
    fn test_label_sanitized() {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            artifact_filename("my chat/notes?", "json", &at),
            "my-chat_notes_-20250101-000000.json"
        );
        assert_eq!(
            artifact_filename("   ", "", &at),
            "document-20250101-000000"
        );
    }
}
