//! Block-structure parser.
//!
//! Top-level dispatcher over logical lines. Each non-blank line starts one
//! block construct, checked in order: heading, thematic break, fenced code,
//! list (unordered, then ordered), blockquote, indented code, paragraph.
//! Multi-line constructs pull further lines from the shared cursor until
//! they hit their terminator; nesting of lists and blockquotes is direct
//! recursion.
//!
//! Termination is signalled upward as a [`Flow`] value. A blank line ends
//! every enclosing list or blockquote level at once; a dedented bullet or
//! shallower quote marker ends the current level and carries the line back
//! to the enclosing level (or to the top-level dispatcher) for re-handling.
//! End of input implicitly terminates anything still open; the dispatcher
//! drains the tag stack after every construct, so emitted tags always
//! balance.

use crate::inline;
use crate::line::{self, Line, Lines};
use crate::tags::{Tag, TagStack};

const FENCE: &str = "```";

/// How a nested construct stopped consuming lines.
#[derive(Debug)]
enum Flow<'a> {
    /// A blank line was seen. Every enclosing level must terminate too.
    Blank,
    /// Input ran out. Treated like a blank line by enclosing levels.
    Eof,
    /// A line belonging to a shallower level was read; the caller re-handles
    /// it at its own depth.
    Dedent(Line<'a>),
}

/// Parse a document body and return the generated HTML fragment.
pub fn render_body(input: &str) -> String {
    let mut ctx = BlockParser::new();
    line::parse_document(input, |lines, first| {
        let mut pending = Some(first);
        while let Some(l) = pending {
            pending = ctx.dispatch(lines, l);
        }
    });
    ctx.finish()
}

/// Parser context for one document: output sink, open-tag stack, and the
/// heading-section state. Never shared across documents.
struct BlockParser {
    out: String,
    tags: TagStack,
    section_open: bool,
}

impl BlockParser {
    fn new() -> Self {
        Self {
            out: String::new(),
            tags: TagStack::new(),
            section_open: false,
        }
    }

    /// Handle one top-level line, consuming any lines that belong to the
    /// construct it starts. Returns a carried line that terminated a nested
    /// construct and still needs top-level dispatch.
    fn dispatch<'a>(&mut self, lines: &mut Lines<'a>, first: Line<'a>) -> Option<Line<'a>> {
        let mut carry = None;

        if let Some(level) = heading_level(first.marker) {
            self.heading(level, first.text);
        } else if matches!(first.marker, "---" | "___" | "***") {
            self.out.push_str("<hr>\n");
        } else if first.marker == FENCE {
            self.fenced_code(lines);
        } else if let Some((tag, sign)) = bullet_kind(&first) {
            if let Flow::Dedent(l) = self.list(lines, first, tag, sign, first.indent) {
                carry = Some(l);
            }
        } else if first.marker.starts_with('>') {
            let depth = quote_depth(first.marker);
            if let Flow::Dedent(l) = self.blockquote(lines, first, depth) {
                carry = Some(l);
            }
        } else if first.indent >= 4 {
            self.indented_code(lines, first);
        } else {
            self.paragraph(lines, first);
        }

        // Close whatever the construct left open before the next line.
        while !self.tags.is_empty() {
            self.tags.pop(&mut self.out);
        }
        carry
    }

    /// Close the trailing section, if any, and hand back the HTML.
    fn finish(mut self) -> String {
        if self.section_open {
            self.out.push_str("</section>\n");
        }
        self.out
    }

    /// `#`..`######` — one line. Each heading starts a fresh `<section>`
    /// that runs until the next heading or end of input.
    fn heading(&mut self, level: usize, text: &str) {
        if self.section_open {
            self.out.push_str("</section>\n");
        }
        self.out.push_str("<section>\n");
        self.section_open = true;

        self.out.push_str(&format!("<h{level}>"));
        inline::parse_inline(text, &mut self.out);
        self.out.push_str(&format!("</h{level}>\n"));
    }

    /// ```` ``` ```` fence: echo lines verbatim (escaped) until the closing
    /// fence or end of input. Blank lines do not terminate fenced code.
    fn fenced_code(&mut self, lines: &mut Lines<'_>) {
        self.tags.push_tag(&mut self.out, Tag::Pre);
        self.tags.push_tag(&mut self.out, Tag::Code);
        while let Some(raw) = lines.read() {
            if line::split_line(raw).marker == FENCE {
                return;
            }
            // The final empty line of a newline-terminated document is the
            // terminator itself, not fence content.
            if raw.is_empty() && !lines.has_more() {
                return;
            }
            inline::escape_text(raw, &mut self.out);
            self.out.push('\n');
        }
    }

    /// Four-space indented code: echo lines with the first line's indent
    /// stripped, until a blank line or end of input. Lines shorter than the
    /// stripped indent are clamped to empty rather than sliced out of range.
    fn indented_code<'a>(&mut self, lines: &mut Lines<'a>, first: Line<'a>) {
        self.tags.push_tag(&mut self.out, Tag::Pre);
        self.tags.push_tag(&mut self.out, Tag::Code);
        inline::escape_text(tail(first.raw, first.indent), &mut self.out);
        self.out.push('\n');
        while let Some(raw) = lines.read() {
            if line::split_line(raw).is_blank() {
                return;
            }
            inline::escape_text(tail(raw, first.indent), &mut self.out);
            self.out.push('\n');
        }
    }

    /// Plain paragraph: inline content, newline-separated, until a blank
    /// line or end of input. Subsequent lines are not re-dispatched.
    fn paragraph<'a>(&mut self, lines: &mut Lines<'a>, first: Line<'a>) {
        self.tags.push_text(&mut self.out, Tag::P, first.raw);
        while let Some(raw) = lines.read() {
            if line::split_line(raw).is_blank() {
                return;
            }
            self.out.push('\n');
            inline::parse_inline(raw, &mut self.out);
        }
    }

    /// One blockquote nesting level at the given quote depth.
    ///
    /// Deeper markers recurse (the open paragraph closes first); shallower
    /// markers close this level and carry the line out; an equal marker
    /// closes and reopens the paragraph.
    fn blockquote<'a>(&mut self, lines: &mut Lines<'a>, first: Line<'a>, depth: usize) -> Flow<'a> {
        self.tags.push_tag(&mut self.out, Tag::Blockquote);
        self.tags.push_text(&mut self.out, Tag::P, first.text);
        loop {
            let Some(raw) = lines.read() else {
                return Flow::Eof;
            };
            let mut line = line::split_line(raw);
            if line.is_blank() {
                return Flow::Blank;
            }
            if !line.marker.starts_with('>') {
                // Continuation of the current paragraph.
                inline::parse_inline(line.raw, &mut self.out);
                continue;
            }

            let mut d = quote_depth(line.marker);
            self.tags.pop(&mut self.out); // close the open paragraph
            if depth < d {
                match self.blockquote(lines, line, d) {
                    Flow::Dedent(l) => {
                        line = l;
                        d = quote_depth(line.marker);
                    }
                    flow => return flow,
                }
            }
            if depth > d {
                self.tags.pop(&mut self.out);
                return Flow::Dedent(line);
            }
            self.tags.push_text(&mut self.out, Tag::P, line.text);
        }
    }

    /// One list nesting level, parameterized by bullet sign and indent.
    ///
    /// A deeper bullet opens a nested list inside the current item; an equal
    /// bullet starts the next item (switching the list element if the sign
    /// changed); a shallower bullet closes this level and carries the line
    /// out. A blank line terminates every level at once.
    fn list<'a>(
        &mut self,
        lines: &mut Lines<'a>,
        first: Line<'a>,
        tag: Tag,
        sign: u8,
        indent: usize,
    ) -> Flow<'a> {
        let mut sign = sign;
        self.tags.push_tag(&mut self.out, tag);
        self.tags.push_text(&mut self.out, Tag::Li, first.text);
        loop {
            let Some(raw) = lines.read() else {
                return Flow::Eof;
            };
            let mut line = line::split_line(raw);
            if line.is_blank() {
                return Flow::Blank;
            }
            let Some(kind) = bullet_kind(&line) else {
                // Continuation of the current item: strip this level's
                // indent plus the would-be bullet column.
                inline::parse_inline(tail(line.raw, indent + 1), &mut self.out);
                continue;
            };
            let (mut item_tag, mut item_sign) = kind;

            if indent < line.indent {
                // Nested list, owned by the item that is currently open.
                self.out.push('\n');
                match self.list(lines, line, item_tag, item_sign, line.indent) {
                    Flow::Dedent(l) => {
                        self.tags.pop(&mut self.out); // close the holding item
                        line = l;
                        let Some(kind) = bullet_kind(&line) else {
                            return Flow::Blank;
                        };
                        (item_tag, item_sign) = kind;
                    }
                    flow => {
                        self.tags.pop(&mut self.out);
                        return flow;
                    }
                }
            } else {
                self.tags.pop(&mut self.out); // close the current item
            }

            if indent > line.indent {
                self.tags.pop(&mut self.out);
                return Flow::Dedent(line);
            }

            // A changed bullet glyph, or an ordered/unordered switch, starts
            // a new list at the same depth.
            if item_sign != sign {
                self.tags.pop(&mut self.out);
                self.tags.push_tag(&mut self.out, item_tag);
                sign = item_sign;
            }
            self.tags.push_text(&mut self.out, Tag::Li, line.text);
        }
    }
}

/// Heading level if the marker is exactly 1–6 `#` characters.
fn heading_level(marker: &str) -> Option<usize> {
    let n = marker.len();
    ((1..=6).contains(&n) && marker.bytes().all(|b| b == b'#')).then_some(n)
}

/// Bullet classification from the marker's trailing bytes: `-`, `+`, `*`
/// open an unordered list, a digit followed by `.` an ordered one.
fn bullet_kind(line: &Line<'_>) -> Option<(Tag, u8)> {
    match line.marker_last() {
        Some(c @ (b'-' | b'+' | b'*')) => Some((Tag::Ul, c)),
        Some(b'.') if line.marker_second_last().is_some_and(|d| d.is_ascii_digit()) => {
            Some((Tag::Ol, b'.'))
        }
        _ => None,
    }
}

/// Quote depth of a blockquote marker: the count of its leading `>` bytes.
///
/// The marker is a whitespace-delimited token, so the scan cannot stall on
/// embedded spaces; anything after the `>` run is ignored.
fn quote_depth(marker: &str) -> usize {
    marker.bytes().take_while(|&b| b == b'>').count()
}

/// `raw` with its first `strip` bytes removed, clamped to the line length
/// and backed off to a character boundary so multibyte text cannot split.
fn tail(raw: &str, strip: usize) -> &str {
    let mut cut = strip.min(raw.len());
    while !raw.is_char_boundary(cut) {
        cut -= 1;
    }
    &raw[cut..]
}
