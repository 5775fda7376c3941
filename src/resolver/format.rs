use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::NewsRecord;

pub const MAX_SUMMARY_CHARS: usize = 500;
pub const TRUNCATION_MARKER: &str = "...";

pub const GREETING: &str = "Hello! Welcome to your English practice.";
pub const CLOSING: &str =
    "I am ready to discuss this news with you. What do you think about it?";

/// Read verbatim when no source produced a record.
pub const STATIC_LESSON: &str = "Welcome to your English practice.
Today's topic is Artificial Intelligence.
AI is rapidly transforming the modern workplace.
Instead of replacing jobs, experts suggest AI will augment human capabilities.
I am ready to discuss this with you. What do you think?";

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Removes every `<...>` span. Entities are left as they are.
pub fn strip_markup(text: &str) -> String {
    TAG.replace_all(text, "").trim().to_string()
}

/// Cuts `text` to [`MAX_SUMMARY_CHARS`] characters, appending the marker
/// only when something was cut.
pub fn truncate_summary(text: &str) -> String {
    match text.char_indices().nth(MAX_SUMMARY_CHARS) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}

pub fn compose_lesson(record: &NewsRecord) -> String {
    let summary = truncate_summary(&strip_markup(&record.summary));
    format!(
        "{GREETING}\n\nToday's news: {}\n\n{}\n\n{CLOSING}",
        record.title.trim(),
        summary
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("<p>New model released</p>"), "New model released");
        assert_eq!(
            strip_markup(r#"<a href="https://x.test">link</a> and <b>bold</b>"#),
            "link and bold"
        );
        assert_eq!(strip_markup("AT&amp;T"), "AT&amp;T");
    }

    #[test]
    fn test_strip_leaves_no_brackets_from_tags() {
        let cleaned = strip_markup("<div><span class='a'>x</span><br/><img src=\"y\"></div>");
        assert_eq!(cleaned, "x");
        assert!(!cleaned.contains('<') && !cleaned.contains('>'));
    }

    #[test]
    fn test_short_summary_untouched() {
        let text = "a".repeat(MAX_SUMMARY_CHARS);
        assert_eq!(truncate_summary(&text), text);
    }

    #[test]
    fn test_long_summary_truncated() {
        let text = "b".repeat(MAX_SUMMARY_CHARS + 1);
        let cut = truncate_summary(&text);
        assert_eq!(cut, format!("{}{}", "b".repeat(MAX_SUMMARY_CHARS), TRUNCATION_MARKER));
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let text = "ж".repeat(MAX_SUMMARY_CHARS + 10);
        let cut = truncate_summary(&text);
        assert_eq!(cut.chars().count(), MAX_SUMMARY_CHARS + TRUNCATION_MARKER.len());
        assert!(cut.starts_with(&"ж".repeat(MAX_SUMMARY_CHARS)));
    }

    #[test]
    fn test_compose_lesson_layout() {
        let record = NewsRecord::new("AI Breakthrough", "<p>New model released</p>");
        let text = compose_lesson(&record);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                GREETING,
                "",
                "Today's news: AI Breakthrough",
                "",
                "New model released",
                "",
                CLOSING,
            ]
        );
    }

    #[test]
    fn test_composed_lesson_truncates_long_summary() {
        let plain: String = (0..MAX_SUMMARY_CHARS + 80)
            .map(|i| char::from(b'a' + (i % 26) as u8))
            .collect();
        let record = NewsRecord::new("Long read", format!("<p><b>{}</b></p>", plain));
        let text = compose_lesson(&record);

        let expected: String = plain.chars().take(MAX_SUMMARY_CHARS).collect();
        let summary_line = text.lines().nth(4).unwrap();
        assert_eq!(summary_line, format!("{}{}", expected, TRUNCATION_MARKER));
        assert!(!text.contains('<') && !text.contains('>'));
    }

    #[test]
    fn test_composed_lesson_keeps_short_summary_whole() {
        let plain = "d".repeat(MAX_SUMMARY_CHARS);
        let record = NewsRecord::new("Short read", format!("<div>{}</div>", plain));
        let text = compose_lesson(&record);

        assert_eq!(text.lines().nth(4), Some(plain.as_str()));
        assert!(!text.contains(TRUNCATION_MARKER));
    }

    #[test]
    fn test_truncation_applies_after_stripping() {
        let body = "c".repeat(MAX_SUMMARY_CHARS);
        let record = NewsRecord::new("T", format!("<p>{}</p>", body));
        let text = compose_lesson(&record);
        assert!(text.contains(&body));
        assert!(!text.contains(TRUNCATION_MARKER));
    }
}
