//! Byte offset to line/column conversion.

/// 1-indexed line and column, column counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCol {
    pub line: u32,
    pub col: u32,
}

/// Convert a byte offset to a 1-indexed line/column position.
///
/// Counts characters, not bytes, so multi-byte text columns come out right.
/// Offsets past the end of the text saturate at the last position.
pub fn offset_to_line_col(text: &str, offset: usize) -> LineCol {
    let mut line = 1u32;
    let mut col = 1u32;
    let mut current = 0usize;

    for ch in text.chars() {
        if current >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
        current += ch.len_utf8();
    }

    LineCol { line, col }
}

/// The text of a 1-indexed line, without its newline.
pub fn line_text(text: &str, line: u32) -> &str {
    text.lines().nth(line.saturating_sub(1) as usize).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_at_start() {
        assert_eq!(offset_to_line_col("abc", 0), LineCol { line: 1, col: 1 });
    }

    #[test]
    fn test_offset_within_line() {
        assert_eq!(offset_to_line_col("abc\ndef", 2), LineCol { line: 1, col: 3 });
    }

    #[test]
    fn test_offset_after_newline() {
        assert_eq!(offset_to_line_col("abc\ndef", 4), LineCol { line: 2, col: 1 });
        assert_eq!(offset_to_line_col("abc\ndef", 6), LineCol { line: 2, col: 3 });
    }

    #[test]
    fn test_multibyte_columns_count_chars() {
        // 'é' is two bytes.
        let text = "é_x";
        assert_eq!(offset_to_line_col(text, 3), LineCol { line: 1, col: 3 });
    }

    #[test]
    fn test_offset_past_end_saturates() {
        let pos = offset_to_line_col("ab", 100);
        assert_eq!(pos, LineCol { line: 1, col: 3 });
    }

    #[test]
    fn test_line_text() {
        assert_eq!(line_text("abc\ndef", 1), "abc");
        assert_eq!(line_text("abc\ndef", 2), "def");
        assert_eq!(line_text("abc\ndef", 3), "");
    }
}
