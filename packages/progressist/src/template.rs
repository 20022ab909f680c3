//! Template parsing and the two-pass layout.
//!
//! A template is text with `{name}` or `{name:spec}` placeholders. `{{` and `}}`
//! are literal braces. The `{animation}` placeholder is a slot: its width is
//! whatever is left of the terminal line once everything else is rendered, so
//! rendering happens in two passes:
//!
//! 1. [`Template::measure`] resolves every other placeholder into a [`Layout`].
//! 2. [`Layout::fill`] renders the slots at the [free space](Layout::free_space).
//!
//! ```rust
//! use progressist::{Template, Value};
//!
//! let template = Template::parse("{name}: [{animation}] {n:>3}").unwrap();
//! let layout = template.measure(&|field: &str| match field {
//!     "name" => Some(Value::from("copy")),
//!     "n" => Some(Value::Count(7.0)),
//!     _ => None,
//! }).unwrap();
//! assert_eq!(layout.placeholder_line(), "copy: [{animation}]   7");
//!
//! let free_space = layout.free_space(20, 0);
//! assert_eq!(free_space, 8);
//! assert_eq!(layout.fill(free_space, |width| "#".repeat(width)), "copy: [########]   7");
//! ```
use crate::{Error, Result, Value, format_field};

/// Name of the slot placeholder
pub const ANIMATION: &str = "animation";
/// What the slot looks like in the first pass
pub const PLACEHOLDER: &str = "{animation}";

/// Resolve a field name to a value. `None` means the field is unknown,
/// which renders as empty text
pub trait FieldLookup {
    fn lookup(&self, name: &str) -> Option<Value>;
}

impl<F> FieldLookup for F
where
    F: Fn(&str) -> Option<Value>,
{
    #[inline(always)]
    fn lookup(&self, name: &str) -> Option<Value> {
        self(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Text(String),
    Field { name: String, spec: String },
    Slot,
}

/// A parsed template
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    source: String,
    pieces: Vec<Piece>,
}

impl Template {
    /// Parse a template. Unbalanced braces and empty field names are errors
    pub fn parse(source: &str) -> Result<Self> {
        let mut pieces = vec![];
        let mut text = String::new();
        let mut chars = source.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    text.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    text.push('}');
                }
                '}' => {
                    return Err(Error::config(format!(
                        "single '}}' in template '{source}'"
                    )));
                }
                '{' => {
                    let mut field = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        match c {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => {
                                return Err(Error::config(format!(
                                    "nested '{{' in template '{source}'"
                                )));
                            }
                            c => field.push(c),
                        }
                    }
                    if !closed {
                        return Err(Error::config(format!(
                            "unmatched '{{' in template '{source}'"
                        )));
                    }
                    let (name, spec) = field.split_once(':').unwrap_or((field.as_str(), ""));
                    let name = name.trim();
                    if name.is_empty() {
                        return Err(Error::config(format!(
                            "empty field name in template '{source}'"
                        )));
                    }
                    if !text.is_empty() {
                        pieces.push(Piece::Text(std::mem::take(&mut text)));
                    }
                    if name == ANIMATION {
                        pieces.push(Piece::Slot);
                    } else {
                        pieces.push(Piece::Field {
                            name: name.to_string(),
                            spec: spec.to_string(),
                        });
                    }
                }
                c => text.push(c),
            }
        }
        if !text.is_empty() {
            pieces.push(Piece::Text(text));
        }
        Ok(Self {
            source: source.to_string(),
            pieces,
        })
    }

    /// The template as written
    #[inline(always)]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Names of the fields referenced, excluding the animation slot
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.pieces.iter().filter_map(|p| match p {
            Piece::Field { name, .. } => Some(name.as_str()),
            _ => None,
        })
    }

    /// If the template has an animation slot
    pub fn has_slot(&self) -> bool {
        self.pieces.iter().any(|p| matches!(p, Piece::Slot))
    }

    /// First pass: resolve and format every field except the slots
    pub fn measure(&self, fields: &impl FieldLookup) -> Result<Layout> {
        let mut pieces = Vec::with_capacity(self.pieces.len());
        for piece in &self.pieces {
            match piece {
                Piece::Text(text) => push_text(&mut pieces, text),
                Piece::Slot => pieces.push(LayoutPiece::Slot),
                Piece::Field { name, spec } => {
                    let Some(value) = fields.lookup(name) else {
                        continue;
                    };
                    let text = format_field(&value, spec).map_err(|e| Error::format(name, e))?;
                    push_text(&mut pieces, &text);
                }
            }
        }
        Ok(Layout { pieces })
    }
}

fn push_text(pieces: &mut Vec<LayoutPiece>, text: &str) {
    if let Some(LayoutPiece::Text(last)) = pieces.last_mut() {
        last.push_str(text);
    } else {
        pieces.push(LayoutPiece::Text(text.to_string()));
    }
}

#[derive(Debug, Clone, PartialEq)]
enum LayoutPiece {
    Text(String),
    Slot,
}

/// A template after the first pass: resolved text and the slots
/// still to be filled
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pieces: Vec<LayoutPiece>,
}

impl Layout {
    /// Number of animation slots
    pub fn slots(&self) -> usize {
        self.pieces
            .iter()
            .filter(|p| matches!(p, LayoutPiece::Slot))
            .count()
    }

    /// The first pass line, with every slot shown as the placeholder
    pub fn placeholder_line(&self) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                LayoutPiece::Text(text) => out.push_str(text),
                LayoutPiece::Slot => out.push_str(PLACEHOLDER),
            }
        }
        out
    }

    /// Columns left for the slots: terminal columns minus the first pass
    /// line, giving back the placeholders and the invisible characters.
    ///
    /// Lengths are in chars. The result is 0 when the fixed text
    /// already fills the line.
    pub fn free_space(&self, columns: usize, invisible_chars: usize) -> usize {
        let line = self.placeholder_line().chars().count();
        let given_back = PLACEHOLDER.chars().count() * self.slots() + invisible_chars;
        (columns + given_back).saturating_sub(line)
    }

    /// Second pass: render the slots with the free space and produce the line.
    ///
    /// The free space is shared between the slots, the first ones taking
    /// the remainder.
    pub fn fill(&self, free_space: usize, mut animation: impl FnMut(usize) -> String) -> String {
        let slots = self.slots();
        let mut out = String::new();
        let mut i = 0;
        for piece in &self.pieces {
            match piece {
                LayoutPiece::Text(text) => out.push_str(text),
                LayoutPiece::Slot => {
                    let mut width = free_space / slots;
                    if i < free_space % slots {
                        width += 1;
                    }
                    out.push_str(&animation(width));
                    i += 1;
                }
            }
        }
        out
    }
}
