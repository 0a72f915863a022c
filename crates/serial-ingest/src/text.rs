use std::path::Path;

use tracing::debug;

use crate::checks::read_utf8;
use crate::error::Result;

/// A line-oriented source: every line is one raw serial.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLines {
    pub lines: Vec<String>,
}

impl TextLines {
    /// Splits text into lines; CRLF endings and a leading BOM are dropped.
    pub fn parse(text: &str) -> Self {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }
}

/// Reads a text file as UTF-8.
pub fn read_text_lines(path: &Path) -> Result<TextLines> {
    let lines = TextLines::parse(&read_utf8(path)?);
    debug!(path = %path.display(), lines = lines.lines.len(), "read text lines");
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_and_blank_lines_are_kept_raw() {
        let lines = TextLines::parse("\u{feff}B72AE6F13C\r\n\r\nSYC12281P0");
        assert_eq!(lines.as_slice(), ["B72AE6F13C", "", "SYC12281P0"]);
    }
}
