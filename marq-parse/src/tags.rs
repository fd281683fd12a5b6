//! Open-tag stack.
//!
//! Records block-level tags in the order they were opened so that closing
//! tags can be emitted in strict reverse order. Every construct that pushes
//! N tags must see exactly those N tags popped before control returns to its
//! caller; the document dispatcher drains whatever a construct leaves open.

use crate::inline;

/// Block-level tags tracked by the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Ul,
    Ol,
    Li,
    Blockquote,
    P,
    Code,
    Pre,
}

impl Tag {
    pub fn name(self) -> &'static str {
        match self {
            Tag::Ul => "ul",
            Tag::Ol => "ol",
            Tag::Li => "li",
            Tag::Blockquote => "blockquote",
            Tag::P => "p",
            Tag::Code => "code",
            Tag::Pre => "pre",
        }
    }
}

/// LIFO record of currently-open block tags.
///
/// Pushing emits the opening tag to the sink immediately; popping emits the
/// matching closing tag. The stack grows without a fixed bound.
#[derive(Debug, Default)]
pub struct TagStack {
    open: Vec<Tag>,
}

impl TagStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `<tag>` on its own line and record it.
    pub fn push_tag(&mut self, out: &mut String, tag: Tag) {
        out.push('<');
        out.push_str(tag.name());
        out.push_str(">\n");
        self.open.push(tag);
    }

    /// Emit `<tag>` followed by the inline-parsed `text`, and record the tag.
    ///
    /// Used for constructs like `<p>` and `<li>` that wrap a single line of
    /// inline content; the closing tag comes from a later `pop`.
    pub fn push_text(&mut self, out: &mut String, tag: Tag, text: &str) {
        out.push('<');
        out.push_str(tag.name());
        out.push('>');
        inline::parse_inline(text, out);
        self.open.push(tag);
    }

    /// Emit the closing tag for the most recently pushed entry.
    ///
    /// Panics on underflow: a pop without a matching push means the block
    /// parser's open/close bookkeeping is broken, which is a defect in the
    /// parser, not in the input.
    pub fn pop(&mut self, out: &mut String) {
        let tag = self
            .open
            .pop()
            .expect("tag stack underflow: closing a tag that was never opened");
        out.push_str("</");
        out.push_str(tag.name());
        out.push_str(">\n");
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.open.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn push_emits_opening_tag() {
        let mut out = String::new();
        let mut stack = TagStack::new();
        stack.push_tag(&mut out, Tag::Ul);
        assert_eq!(out, "<ul>\n");
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn pop_closes_in_reverse_order() {
        let mut out = String::new();
        let mut stack = TagStack::new();
        stack.push_tag(&mut out, Tag::Ul);
        stack.push_tag(&mut out, Tag::Li);
        stack.pop(&mut out);
        stack.pop(&mut out);
        assert_eq!(out, "<ul>\n<li>\n</li>\n</ul>\n");
        assert!(stack.is_empty());
    }

    #[test]
    fn push_text_parses_inline_content() {
        let mut out = String::new();
        let mut stack = TagStack::new();
        stack.push_text(&mut out, Tag::P, "some *emphasis* here");
        stack.pop(&mut out);
        assert_eq!(out, "<p>some <em>emphasis</em> here</p>\n");
    }

    #[test]
    #[should_panic(expected = "tag stack underflow")]
    fn pop_on_empty_stack_panics() {
        let mut out = String::new();
        TagStack::new().pop(&mut out);
    }
}
