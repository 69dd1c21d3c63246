use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

/// Cut `text` to at most `max_width` terminal columns, ending with `...`.
pub fn truncate_text_unicode(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let ellipsis_width = ELLIPSIS.width();
    if max_width <= ellipsis_width {
        return ELLIPSIS[..max_width].to_string();
    }

    let target_width = max_width - ellipsis_width;
    let mut result = String::new();
    let mut current_width = 0;

    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if current_width + ch_width > target_width {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }

    result.push_str(ELLIPSIS);
    result
}

/// Collapse line breaks and runs of whitespace so the text fits one table row.
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text ready for a table cell: one line, at most `max_width` columns.
pub fn cell_text(text: &str, max_width: usize) -> String {
    truncate_text_unicode(&single_line(text), max_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_unicode() {
        assert_eq!(truncate_text_unicode("Hello", 10), "Hello");
        assert_eq!(truncate_text_unicode("Hello World!", 8), "Hello...");
        assert_eq!(truncate_text_unicode("", 5), "");
        assert_eq!(truncate_text_unicode("Hello", 2), "..");
    }

    #[test]
    fn test_truncate_counts_wide_characters() {
        // each CJK character takes two columns
        assert_eq!(truncate_text_unicode("日本語のメッセージ", 9), "日本語...");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("Remove this\n  unused   import."), "Remove this unused import.");
        assert_eq!(single_line(""), "");
    }

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text("a\nb", 10), "a b");
        assert_eq!(cell_text("Refactor this method\nto reduce complexity", 12), "Refactor ...");
    }
}
