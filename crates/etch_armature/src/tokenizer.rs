//! Markup tokenizer for template fragments.
//!
//! The tokenizer walks the literal fragments of a template as one stream, with an
//! interpolation boundary between every pair of fragments. Inside a fragment it is a
//! byte-level state machine; at a boundary the current state decides what the
//! interpolated value is (attribute value, spread object, attribute name or child)
//! or rejects it. Nothing at a boundary is ever read from the value itself, so the
//! same fragments always tokenize the same way.

use etch_relief::{AttrValue, EtchError, Location, Result};

/// Bytes the scanner branches on.
pub mod char_codes {
    pub const TAB: u8 = 0x09;
    pub const NEWLINE: u8 = 0x0A;
    pub const FORM_FEED: u8 = 0x0C;
    pub const CARRIAGE_RETURN: u8 = 0x0D;
    pub const SPACE: u8 = 0x20;
    pub const EXCLAMATION_MARK: u8 = 0x21;
    pub const DOUBLE_QUOTE: u8 = 0x22;
    pub const SINGLE_QUOTE: u8 = 0x27;
    pub const DASH: u8 = 0x2D;
    pub const DOT: u8 = 0x2E;
    pub const SLASH: u8 = 0x2F;
    pub const LT: u8 = 0x3C;
    pub const EQ: u8 = 0x3D;
    pub const GT: u8 = 0x3E;
    pub const GRAVE_ACCENT: u8 = 0x60;
}

use char_codes::*;

/// Scanner position within the markup grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum State {
    Text = 1,

    // Tags
    BeforeTagName,
    InTagName,
    InSelfClosingTag,
    InClosingTagName,
    AfterClosingTagName,

    // Attributes
    BeforeAttrName,
    InAttrName,
    AfterAttrName,
    BeforeAttrValue,
    InAttrValueDq,
    InAttrValueSq,
    InAttrValueNq,
    AfterAttrValue,
    Spread,

    // Comments
    InComment,
}

/// Tokenizer callbacks
///
/// Every callback can fail; the first error stops tokenizing.
pub trait Callbacks {
    /// Raw literal text between tags and interpolations.
    fn on_text(&mut self, text: &str, loc: Location) -> Result<()>;

    fn on_open_tag_name(&mut self, name: &str, loc: Location) -> Result<()>;
    fn on_open_tag_end(&mut self, self_closing: bool) -> Result<()>;
    fn on_close_tag(&mut self, name: &str, loc: Location) -> Result<()>;

    /// A named attribute with a literal, bare or interpolated value.
    fn on_attribute(&mut self, name: &str, value: AttrValue, loc: Location) -> Result<()>;
    fn on_spread(&mut self, slot: usize, loc: Location) -> Result<()>;
    fn on_dynamic_name(&mut self, slot: usize, loc: Location) -> Result<()>;
    fn on_dynamic_child(&mut self, slot: usize, loc: Location) -> Result<()>;

    /// An interpolation inside a comment.
    fn on_ignored(&mut self, _slot: usize) -> Result<()> {
        Ok(())
    }

    fn on_end(&mut self) -> Result<()>;
}

/// ASCII letters open a tag name.
#[inline]
pub fn is_tag_start_char(c: u8) -> bool {
    etch_carton::is_tag_start_char(c)
}

/// Space, tab, newline, carriage return or form feed.
#[inline]
pub fn is_whitespace(c: u8) -> bool {
    c == SPACE || c == NEWLINE || c == TAB || c == FORM_FEED || c == CARRIAGE_RETURN
}

/// Markup tokenizer
pub struct Tokenizer<'a, C: Callbacks> {
    /// Literal fragments
    fragments: &'a [&'a str],
    /// Index of the fragment being scanned
    fragment: usize,
    /// Current fragment
    input: &'a str,
    /// Current state
    state: State,
    /// Buffer start position
    section_start: usize,
    /// Current index
    index: usize,
    /// Location of the `<` that opened the current tag
    tag_start: Location,
    /// Attribute name waiting for its value
    pending_name: Option<(&'a str, Location)>,
    /// Closing tag name read before trailing whitespace
    closing_name: &'a str,
    /// Dots seen in the current spread marker
    spread_dots: u8,
    spread_start: Location,
    /// Callbacks
    callbacks: C,
}

impl<'a, C: Callbacks> Tokenizer<'a, C> {
    /// Create a new tokenizer
    pub fn new(fragments: &'a [&'a str], callbacks: C) -> Self {
        Self {
            fragments,
            fragment: 0,
            input: "",
            state: State::Text,
            section_start: 0,
            index: 0,
            tag_start: Location::default(),
            pending_name: None,
            closing_name: "",
            spread_dots: 0,
            spread_start: Location::default(),
            callbacks,
        }
    }

    /// Tokenize every fragment and hand the callbacks back.
    pub fn tokenize(mut self) -> Result<C> {
        let count = self.fragments.len();
        for fragment in 0..count {
            self.fragment = fragment;
            self.input = self.fragments[fragment];
            self.index = 0;
            self.section_start = 0;

            let bytes = self.input.as_bytes();
            while self.index < bytes.len() {
                let c = bytes[self.index];
                match self.state {
                    State::Text => self.state_text(c)?,
                    State::BeforeTagName => self.state_before_tag_name(c)?,
                    State::InTagName => self.state_in_tag_name(c)?,
                    State::InSelfClosingTag => self.state_in_self_closing_tag(c)?,
                    State::InClosingTagName => self.state_in_closing_tag_name(c)?,
                    State::AfterClosingTagName => self.state_after_closing_tag_name(c)?,
                    State::BeforeAttrName => self.state_before_attr_name(c)?,
                    State::InAttrName => self.state_in_attr_name(c)?,
                    State::AfterAttrName => self.state_after_attr_name(c)?,
                    State::BeforeAttrValue => self.state_before_attr_value(c)?,
                    State::InAttrValueDq => self.state_in_attr_value_quoted(c, DOUBLE_QUOTE)?,
                    State::InAttrValueSq => self.state_in_attr_value_quoted(c, SINGLE_QUOTE)?,
                    State::InAttrValueNq => self.state_in_attr_value_nq(c)?,
                    State::AfterAttrValue => self.state_after_attr_value(c)?,
                    State::Spread => self.state_spread(c)?,
                    State::InComment => self.state_in_comment(c),
                }
                self.index += 1;
            }

            if fragment + 1 < count {
                self.on_boundary(fragment)?;
            }
        }

        self.cleanup()?;
        self.callbacks.on_end()?;
        Ok(self.callbacks)
    }

    #[inline]
    fn loc(&self, offset: usize) -> Location {
        Location::new(self.fragment, offset)
    }

    #[inline]
    fn section(&self) -> &'a str {
        &self.input[self.section_start..self.index]
    }

    #[inline]
    fn rest(&self) -> &'a str {
        &self.input[self.index..]
    }

    fn unexpected(&self, context: &'static str) -> EtchError {
        EtchError::UnexpectedCharacter {
            ch: self.rest().chars().next().unwrap_or('\u{FFFD}'),
            context,
            loc: self.loc(self.index),
        }
    }

    fn emit_text(&mut self) -> Result<()> {
        if self.index > self.section_start {
            let text = self.section();
            let loc = self.loc(self.section_start);
            self.callbacks.on_text(text, loc)?;
        }
        Ok(())
    }

    fn finish_open_tag(&mut self, self_closing: bool) -> Result<()> {
        self.callbacks.on_open_tag_end(self_closing)?;
        self.state = State::Text;
        self.section_start = self.index + 1;
        Ok(())
    }

    /// Emit the pending attribute name as a bare (`true`) attribute.
    fn flush_bare_attribute(&mut self) -> Result<()> {
        if let Some((name, loc)) = self.pending_name.take() {
            self.callbacks.on_attribute(name, AttrValue::True, loc)?;
        }
        Ok(())
    }

    fn take_pending_name(&mut self) -> (&'a str, Location) {
        self.pending_name
            .take()
            .unwrap_or(("", self.loc(self.section_start)))
    }

    // Fragment boundaries

    fn on_boundary(&mut self, slot: usize) -> Result<()> {
        let loc = self.loc(self.input.len());
        let position = match self.state {
            State::Text => {
                self.emit_text()?;
                return self.callbacks.on_dynamic_child(slot, loc);
            }
            State::BeforeAttrValue => {
                let (name, name_loc) = self.take_pending_name();
                self.callbacks
                    .on_attribute(name, AttrValue::Placeholder(slot), name_loc)?;
                self.state = State::AfterAttrValue;
                return Ok(());
            }
            State::Spread if self.spread_dots == 3 => {
                self.callbacks.on_spread(slot, self.spread_start)?;
                self.state = State::AfterAttrValue;
                return Ok(());
            }
            State::BeforeAttrName => {
                self.callbacks.on_dynamic_name(slot, loc)?;
                self.state = State::AfterAttrValue;
                return Ok(());
            }
            State::AfterAttrName => {
                self.flush_bare_attribute()?;
                self.callbacks.on_dynamic_name(slot, loc)?;
                self.state = State::AfterAttrValue;
                return Ok(());
            }
            State::InComment => return self.callbacks.on_ignored(slot),
            State::Spread => "after an incomplete spread marker",
            State::InAttrValueDq | State::InAttrValueSq => "inside a quoted attribute value",
            State::InAttrValueNq => "inside an unquoted attribute value",
            State::BeforeTagName | State::InTagName => "in a tag name",
            State::InClosingTagName | State::AfterClosingTagName => "in a closing tag",
            State::InAttrName => "inside an attribute name",
            State::AfterAttrValue => "directly after an attribute value",
            State::InSelfClosingTag => "after `/` in a tag",
        };
        Err(EtchError::MisplacedInterpolation { position, loc })
    }

    fn cleanup(&mut self) -> Result<()> {
        match self.state {
            State::Text => self.emit_text(),
            State::InComment => Err(EtchError::UnexpectedEnd {
                context: "inside a comment",
            }),
            _ => Err(EtchError::UnexpectedEnd {
                context: "inside a tag",
            }),
        }
    }

    // States

    fn state_text(&mut self, c: u8) -> Result<()> {
        if c == LT {
            self.emit_text()?;
            self.state = State::BeforeTagName;
            self.tag_start = self.loc(self.index);
            self.section_start = self.index;
        }
        Ok(())
    }

    fn state_before_tag_name(&mut self, c: u8) -> Result<()> {
        if c == SLASH {
            self.state = State::InClosingTagName;
            self.section_start = self.index + 1;
        } else if c == GT {
            // `<>` opens a fragment
            self.callbacks.on_open_tag_name("Fragment", self.tag_start)?;
            self.finish_open_tag(false)?;
        } else if c == EXCLAMATION_MARK {
            if !self.rest().starts_with("!--") {
                return Err(self.unexpected("after `<`, only comments may start with `<!`"));
            }
            self.state = State::InComment;
            self.index += 2;
        } else if is_tag_start_char(c) {
            self.section_start = self.index;
            self.state = State::InTagName;
        } else {
            return Err(self.unexpected("after `<`"));
        }
        Ok(())
    }

    fn state_in_tag_name(&mut self, c: u8) -> Result<()> {
        if is_whitespace(c) || c == SLASH || c == GT {
            self.callbacks
                .on_open_tag_name(self.section(), self.tag_start)?;
            self.state = State::BeforeAttrName;
            self.state_before_attr_name(c)?;
        }
        Ok(())
    }

    fn state_in_self_closing_tag(&mut self, c: u8) -> Result<()> {
        if c == GT {
            self.finish_open_tag(true)
        } else {
            Err(self.unexpected("after `/` in a tag"))
        }
    }

    fn state_in_closing_tag_name(&mut self, c: u8) -> Result<()> {
        if c == GT {
            let name = match self.section() {
                "" => "Fragment",
                name => name,
            };
            self.callbacks.on_close_tag(name, self.tag_start)?;
            self.state = State::Text;
            self.section_start = self.index + 1;
        } else if is_whitespace(c) {
            if self.index == self.section_start {
                self.section_start = self.index + 1;
            } else {
                self.closing_name = self.section();
                self.state = State::AfterClosingTagName;
            }
        }
        Ok(())
    }

    fn state_after_closing_tag_name(&mut self, c: u8) -> Result<()> {
        if c == GT {
            self.callbacks.on_close_tag(self.closing_name, self.tag_start)?;
            self.state = State::Text;
            self.section_start = self.index + 1;
        } else if !is_whitespace(c) {
            return Err(self.unexpected("in a closing tag"));
        }
        Ok(())
    }

    fn state_before_attr_name(&mut self, c: u8) -> Result<()> {
        if is_whitespace(c) {
            return Ok(());
        }
        match c {
            GT => self.finish_open_tag(false)?,
            SLASH => self.state = State::InSelfClosingTag,
            EQ => {
                return Err(EtchError::MissingAttributeName {
                    loc: self.loc(self.index),
                })
            }
            DOT => {
                self.state = State::Spread;
                self.spread_dots = 1;
                self.spread_start = self.loc(self.index);
            }
            DOUBLE_QUOTE | SINGLE_QUOTE | LT => {
                return Err(self.unexpected("before an attribute name"))
            }
            _ => {
                self.section_start = self.index;
                self.state = State::InAttrName;
            }
        }
        Ok(())
    }

    fn state_in_attr_name(&mut self, c: u8) -> Result<()> {
        if c == EQ || is_whitespace(c) {
            self.pending_name = Some((self.section(), self.loc(self.section_start)));
            self.state = if c == EQ {
                State::BeforeAttrValue
            } else {
                State::AfterAttrName
            };
        } else if c == SLASH || c == GT {
            let loc = self.loc(self.section_start);
            self.callbacks
                .on_attribute(self.section(), AttrValue::True, loc)?;
            if c == GT {
                self.finish_open_tag(false)?;
            } else {
                self.state = State::InSelfClosingTag;
            }
        } else if matches!(c, DOUBLE_QUOTE | SINGLE_QUOTE | LT) {
            return Err(self.unexpected("in an attribute name"));
        }
        Ok(())
    }

    fn state_after_attr_name(&mut self, c: u8) -> Result<()> {
        if is_whitespace(c) {
            return Ok(());
        }
        if c == EQ {
            self.state = State::BeforeAttrValue;
            return Ok(());
        }
        if matches!(c, DOUBLE_QUOTE | SINGLE_QUOTE | LT) {
            return Err(self.unexpected("after an attribute name"));
        }
        self.flush_bare_attribute()?;
        self.state = State::BeforeAttrName;
        self.state_before_attr_name(c)
    }

    fn state_before_attr_value(&mut self, c: u8) -> Result<()> {
        if is_whitespace(c) {
            return Ok(());
        }
        match c {
            DOUBLE_QUOTE => {
                self.state = State::InAttrValueDq;
                self.section_start = self.index + 1;
            }
            SINGLE_QUOTE => {
                self.state = State::InAttrValueSq;
                self.section_start = self.index + 1;
            }
            GT => {
                let (name, loc) = self.take_pending_name();
                return Err(EtchError::MissingAttributeValue {
                    name: name.into(),
                    loc,
                });
            }
            _ => {
                self.state = State::InAttrValueNq;
                self.section_start = self.index;
            }
        }
        Ok(())
    }

    fn emit_literal_attribute(&mut self) -> Result<()> {
        let (name, loc) = self.take_pending_name();
        let value = AttrValue::Literal(self.section().into());
        self.callbacks.on_attribute(name, value, loc)
    }

    fn state_in_attr_value_quoted(&mut self, c: u8, quote: u8) -> Result<()> {
        if c == quote {
            self.emit_literal_attribute()?;
            self.state = State::AfterAttrValue;
        }
        Ok(())
    }

    fn state_in_attr_value_nq(&mut self, c: u8) -> Result<()> {
        if is_whitespace(c) {
            self.emit_literal_attribute()?;
            self.state = State::BeforeAttrName;
        } else if c == GT {
            self.emit_literal_attribute()?;
            self.finish_open_tag(false)?;
        } else if c == SLASH && self.rest().as_bytes().get(1) == Some(&GT) {
            self.emit_literal_attribute()?;
            self.state = State::InSelfClosingTag;
        } else if matches!(c, DOUBLE_QUOTE | SINGLE_QUOTE | LT | EQ | GRAVE_ACCENT) {
            return Err(self.unexpected("in an unquoted attribute value"));
        }
        Ok(())
    }

    fn state_after_attr_value(&mut self, c: u8) -> Result<()> {
        if is_whitespace(c) {
            self.state = State::BeforeAttrName;
        } else if c == GT {
            self.finish_open_tag(false)?;
        } else if c == SLASH {
            self.state = State::InSelfClosingTag;
        } else {
            return Err(self.unexpected("after an attribute value, expected whitespace"));
        }
        Ok(())
    }

    fn state_spread(&mut self, c: u8) -> Result<()> {
        if c == DOT && self.spread_dots < 3 {
            self.spread_dots += 1;
            Ok(())
        } else {
            Err(self.unexpected("in a spread, `...` must be followed by an interpolation"))
        }
    }

    fn state_in_comment(&mut self, c: u8) {
        if c == DASH && self.rest().starts_with("-->") {
            self.index += 2;
            self.state = State::Text;
            self.section_start = self.index + 1;
        }
    }
}
