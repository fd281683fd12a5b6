//! Inline span parser.
//!
//! Converts one line's text into HTML in a single left-to-right scan.
//! Recognized spans, in priority order at each position:
//!
//! - doubled prefixes first: `**`/`__` → `<strong>`, `~~` → `<s>`
//! - then single prefixes: `*`/`_` → `<em>`, `` ` `` → `<code>`,
//!   `[label](target)` → `<a>`, `![label](target)` → `<img>`
//!
//! A prefix with no matching closing delimiter before the end of the scan
//! range is not an error: it degrades to literal text and the cursor moves
//! on by one character. Raw `<` and `>` are escaped wherever literal text is
//! emitted; `&` is left alone, so already-escaped entities pass through
//! unchanged.
//!
//! All delimiters are ASCII, so the scan works on byte offsets and every
//! slice it takes falls on a character boundary.

/// Parse `text` for inline spans and append the generated HTML to `out`.
pub fn parse_inline(text: &str, out: &mut String) {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let doubled = i + 1 < bytes.len() && bytes[i + 1] == b;
        let next = if doubled {
            match b {
                b'*' | b'_' => match_span(text, i + 2, "strong", Closer::Double(b), true, out),
                b'~' => match_span(text, i + 2, "s", Closer::Double(b), true, out),
                _ => None,
            }
        } else {
            match b {
                b'*' | b'_' => match_span(text, i + 1, "em", Closer::Single(b), true, out),
                b'`' => match_span(text, i + 1, "code", Closer::Single(b), false, out),
                b'[' => match_link(text, i, false, out),
                b'!' => match_link(text, i, true, out),
                _ => None,
            }
        };
        match next {
            Some(pos) => i = pos,
            None => {
                // No span starts here: emit one escaped character.
                let ch = text[i..].chars().next().unwrap_or('\u{fffd}');
                escape_char(ch, out);
                i += ch.len_utf8();
            }
        }
    }
}

/// Append `text` to `out` with `<` and `>` escaped and no span parsing.
///
/// Used for inline code content and for code-block lines.
pub fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        escape_char(ch, out);
    }
}

fn escape_char(ch: char, out: &mut String) {
    match ch {
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        _ => out.push(ch),
    }
}

/// Closing delimiter shape for a paired span.
enum Closer {
    /// Next occurrence of the byte.
    Single(u8),
    /// Next occurrence of the byte immediately followed by itself.
    Double(u8),
}

/// Find the closing delimiter for the span content starting at `from`.
///
/// The doubled form succeeds only if the *first* occurrence of the byte is
/// immediately followed by its pair; a lone occurrence ends the search
/// rather than restarting it further right.
fn find_closer(bytes: &[u8], from: usize, closer: &Closer) -> Option<usize> {
    match *closer {
        Closer::Single(c) => bytes[from..].iter().position(|&b| b == c).map(|p| from + p),
        Closer::Double(c) => {
            let p = bytes[from..].iter().position(|&b| b == c).map(|p| from + p)?;
            (p + 1 < bytes.len() && bytes[p + 1] == c).then_some(p)
        }
    }
}

/// Try to close a paired span whose content starts at `from`.
///
/// On success the whole span (tags plus content) is emitted and the scan
/// position just past the closing delimiter is returned. Content is parsed
/// recursively for nested spans, except inside `<code>` where it is only
/// escaped.
fn match_span(
    text: &str,
    from: usize,
    tag: &str,
    closer: Closer,
    recurse: bool,
    out: &mut String,
) -> Option<usize> {
    let close = find_closer(text.as_bytes(), from, &closer)?;

    out.push('<');
    out.push_str(tag);
    out.push('>');
    if recurse {
        parse_inline(&text[from..close], out);
    } else {
        escape_text(&text[from..close], out);
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');

    match closer {
        Closer::Single(_) => Some(close + 1),
        Closer::Double(_) => Some(close + 2),
    }
}

/// Try to parse `[label](target)` or `![label](target)` starting at `at`.
///
/// The target may carry a quoted title after a space: `(url "Title")`. If
/// the `](` pair or the closing `)` is missing, nothing is emitted and the
/// prefix character falls back to literal text.
fn match_link(text: &str, at: usize, image: bool, out: &mut String) -> Option<usize> {
    let bytes = text.as_bytes();
    let label_open = if image { at + 1 } else { at };
    if bytes.get(label_open) != Some(&b'[') {
        return None;
    }

    // `](` terminates the label and opens the target. As with doubled span
    // delimiters, a `]` not followed by `(` fails the match outright.
    let label_close = find_closer(bytes, label_open + 1, &Closer::Single(b']'))
        .filter(|&p| bytes.get(p + 1) == Some(&b'('))?;
    let target_start = label_close + 2;
    let target_close = find_closer(bytes, target_start, &Closer::Single(b')'))?;

    let label = &text[label_open + 1..label_close];

    // A space inside the target separates the URL from an optional title.
    let title_sep = bytes[target_start..target_close]
        .iter()
        .position(|&b| b == b' ')
        .map(|p| target_start + p);

    let (target, title) = match title_sep {
        Some(sep) => {
            let tok = text[sep + 1..target_close].trim();
            let title = tok.strip_prefix('"').and_then(|t| t.strip_suffix('"')).unwrap_or(tok);
            (&text[target_start..sep], Some(title))
        }
        None => (&text[target_start..target_close], None),
    };

    if image {
        out.push_str("<img src=\"");
        escape_text(target, out);
        out.push_str("\" alt=\"");
        escape_text(label, out);
        out.push('"');
        if let Some(title) = title {
            out.push_str(" title=\"");
            escape_text(title, out);
            out.push('"');
        }
        out.push('>');
    } else {
        out.push_str("<a href=\"");
        escape_text(target, out);
        out.push('"');
        if let Some(title) = title {
            out.push_str(" title=\"");
            escape_text(title, out);
            out.push('"');
        }
        out.push('>');
        escape_text(label, out);
        out.push_str("</a>");
    }

    Some(target_close + 1)
}
