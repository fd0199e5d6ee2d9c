use unicode_width::UnicodeWidthChar;

pub const ELLIPSIS: &str = "…";

pub struct TextMetrics {
    /// Display columns a collapsed description may occupy.
    pub summary_columns: usize,
    /// How far back from the cut to look for a word boundary.
    pub word_break_window: usize,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            summary_columns: 300,
            word_break_window: 40,
        }
    }
}

/// A description cut down for the collapsed card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary<'a> {
    pub text: &'a str,
    pub truncated: bool,
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

impl TextMetrics {
    /// Sum of per-char display widths. Control characters count as zero.
    /// `summarize` cuts with the same measure, so a text that fits is never cut.
    pub fn text_width(&self, text: &str) -> usize {
        text.chars().map(char_width).sum()
    }

    /// Shorten `text` to fit `summary_columns`, preferring to cut at whitespace.
    pub fn summarize<'a>(&self, text: &'a str) -> Summary<'a> {
        if self.text_width(text) <= self.summary_columns {
            return Summary {
                text,
                truncated: false,
            };
        }

        let mut width = 0;
        let mut cut = 0;
        for (i, c) in text.char_indices() {
            width += char_width(c);
            if width > self.summary_columns {
                break;
            }
            cut = i + c.len_utf8();
        }

        let head = &text[..cut];
        let min_cut = cut.saturating_sub(self.word_break_window);
        let text = match head.rfind(char::is_whitespace) {
            Some(ws) if ws > 0 && ws >= min_cut => head[..ws].trim_end(),
            _ => head,
        };

        Summary {
            text,
            truncated: true,
        }
    }
}
