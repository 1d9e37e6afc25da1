//! Message box geometry.

const MIN_HEIGHT: usize = 8;
const MAX_HEIGHT: usize = 20;
const BORDER_ROWS: usize = 4;

const MIN_WIDTH: usize = 60;
const MAX_WIDTH: usize = 80;
const PADDING_COLUMNS: usize = 10;

/// Height and width of a message box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxSize {
    pub height: usize,
    pub width: usize,
}

impl BoxSize {
    /// Sizes a message box to fit `text`.
    ///
    /// Trailing whitespace is ignored. Line length is the number of
    /// characters, whatever their rendered width.
    #[must_use]
    pub fn for_text(text: &str) -> Self {
        let lines = split_lines(text.trim_end());

        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        Self {
            height: BORDER_ROWS
                .saturating_add(lines.len())
                .clamp(MIN_HEIGHT, MAX_HEIGHT),
            width: longest
                .saturating_add(PADDING_COLUMNS)
                .clamp(MIN_WIDTH, MAX_WIDTH),
        }
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\x0b'
            | '\x0c'
            | '\x1c'
            | '\x1d'
            | '\x1e'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Splits `text` at every line boundary: `\n`, `\r\n`, a bare `\r`, vertical
/// tab, form feed, the ASCII record separators, NEL and the Unicode line and
/// paragraph separators. A final terminator does not open another line.
pub(crate) fn split_lines(text: &str) -> Vec<String> {
    let text = text.replace("\r\n", "\n");
    let mut lines: Vec<String> = text.split(is_line_break).map(String::from).collect();

    if text.is_empty() || text.ends_with(is_line_break) {
        lines.pop();
    }

    lines
}
