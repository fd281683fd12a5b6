//! Line reader.
//!
//! Splits a document into raw lines and classifies each line by its leading
//! indent and first token (the "marker"). The marker decides which block
//! construct a line starts; the text after it is handed to the inline parser.

/// Forward-only cursor over the lines of a document.
///
/// Lines are yielded without their terminating `\n`. A trailing newline in
/// the input produces one final empty (blank) line, which block parsers
/// treat as a terminator.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: Option<&'a str>,
}

impl<'a> Lines<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { rest: Some(input) }
    }

    /// True if `read` will yield another line.
    pub fn has_more(&self) -> bool {
        self.rest.is_some()
    }

    /// Consume and return the next line, without its terminator.
    pub fn read(&mut self) -> Option<&'a str> {
        let rest = self.rest?;
        match rest.find('\n') {
            Some(i) => {
                self.rest = Some(&rest[i + 1..]);
                Some(&rest[..i])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

/// One raw line, split into indent, marker, and trailing text.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    /// The whole line, terminator excluded.
    pub raw: &'a str,
    /// Count of leading whitespace bytes.
    pub indent: usize,
    /// First whitespace-delimited token. Empty iff the line is blank.
    pub marker: &'a str,
    /// Content after the marker and one separator character.
    pub text: &'a str,
}

impl<'a> Line<'a> {
    /// A line is blank iff it contains nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.marker.is_empty()
    }

    /// Last byte of the marker (list bullet detection).
    pub fn marker_last(&self) -> Option<u8> {
        self.marker.as_bytes().last().copied()
    }

    /// Byte before the last marker byte (ordered-list digit detection).
    pub fn marker_second_last(&self) -> Option<u8> {
        let bytes = self.marker.as_bytes();
        bytes.len().checked_sub(2).map(|i| bytes[i])
    }
}

/// Split a raw line into its `Line` parts.
pub fn split_line(raw: &str) -> Line<'_> {
    let indent = raw.len() - raw.trim_start().len();
    let after_indent = &raw[indent..];
    let marker_len = after_indent
        .find(char::is_whitespace)
        .unwrap_or(after_indent.len());
    let marker = &after_indent[..marker_len];

    // Step over the marker and the single separator character after it,
    // which may be a multi-byte whitespace char.
    let after_marker = &after_indent[marker_len..];
    let sep_len = after_marker.chars().next().map_or(0, char::len_utf8);
    let text = &after_marker[sep_len..];

    Line {
        raw,
        indent,
        marker,
        text,
    }
}

/// Drive a per-line handler over a whole document.
///
/// Fully blank lines between constructs are skipped here; handlers that pull
/// further lines from the cursor see blank lines and treat them as
/// terminator signals.
pub fn parse_document<'a, F>(input: &'a str, mut handle: F)
where
    F: FnMut(&mut Lines<'a>, Line<'a>),
{
    let mut lines = Lines::new(input);
    while let Some(raw) = lines.read() {
        let line = split_line(raw);
        if line.is_blank() {
            continue;
        }
        handle(&mut lines, line);
    }
}
