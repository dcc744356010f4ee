//! Low-level XML walking for the source document.
//!
//! A [`Cursor`] wraps the raw event stream and tracks how many elements are
//! currently open. Every [`ElementReader`] remembers the depth at which its
//! element was opened, so a parent can always resynchronize after a child
//! handler returns, no matter how much (or little) of the child the handler
//! consumed. Unrecognised elements therefore need no explicit skipping:
//! whatever a handler leaves behind is dropped on the way to the next
//! sibling.

pub type Result<T> = std::result::Result<T, Error>;

use backtrace::Backtrace;
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::num::{ParseFloatError, ParseIntError};
use std::str::{FromStr, ParseBoolError};
use xml::attribute::OwnedAttribute;
use xml::reader::XmlEvent;

/// The event stream plus the number of elements currently open. Reading a
/// start tag deepens it, reading an end tag closes one level.
pub struct Cursor<I>
where
    I: Iterator<Item = xml::reader::Result<XmlEvent>>,
{
    events: I,
    depth: usize,
}

impl<I> Cursor<I>
where
    I: Iterator<Item = xml::reader::Result<XmlEvent>>,
{
    pub fn new(events: I) -> Self {
        Self { events, depth: 0 }
    }

    fn next(&mut self) -> Option<xml::reader::Result<XmlEvent>> {
        let event = self.events.next()?;
        match &event {
            Ok(XmlEvent::StartElement { .. }) => self.depth += 1,
            Ok(XmlEvent::EndElement { .. }) => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }
        Some(event)
    }
}

/// One element under the cursor: its attributes, the dotted trail of element
/// names leading to it (for error messages), and the depth its start tag
/// opened.
pub struct ElementReader<'a, I>
where
    I: Iterator<Item = xml::reader::Result<XmlEvent>>,
{
    cursor: &'a mut Cursor<I>,
    trail: String,
    level: usize,
    attributes: Vec<OwnedAttribute>,
}

impl<'a, I> ElementReader<'a, I>
where
    I: Iterator<Item = xml::reader::Result<XmlEvent>>,
{
    /// The reader for the document itself, enclosing the root element.
    pub fn document(cursor: &'a mut Cursor<I>) -> Self {
        Self {
            cursor,
            trail: String::new(),
            level: 0,
            attributes: Vec::new(),
        }
    }

    /// The dotted element-name trail, e.g. `OpenDRIVE.road.planView`.
    pub fn trail(&self) -> &str {
        &self.trail
    }

    fn child_trail(&self, name: &str) -> String {
        if self.trail.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.trail, name)
        }
    }

    fn lookup<T: FromStr>(&self, name: &str) -> Result<Option<T>>
    where
        T::Err: Into<ParseError>,
    {
        let Some(attribute) = self
            .attributes
            .iter()
            .find(|a| a.name.local_name.eq_ignore_ascii_case(name))
        else {
            return Ok(None);
        };
        attribute.value.parse::<T>().map(Some).map_err(|cause| {
            Error::Attribute {
                element: self.trail.clone(),
                name: name.to_string(),
                ty: core::any::type_name::<T>(),
                cause: cause.into(),
                trace: Box::new(Backtrace::new()),
            }
        })
    }

    pub fn attribute<T: FromStr>(&self, name: &str) -> Result<T>
    where
        T::Err: Into<ParseError>,
    {
        self.lookup(name)?.ok_or_else(|| Error::MissingAttribute {
            element: self.trail.clone(),
            name: name.to_string(),
        })
    }

    pub fn attribute_opt<T: FromStr>(&self, name: &str) -> Result<Option<T>>
    where
        T::Err: Into<ParseError>,
    {
        self.lookup(name)
    }

    /// Hands every child element to `handle` in document order and stops
    /// after this element's end tag. Before each read the cursor is brought
    /// back to this element's level, which drops anything the previous
    /// handler did not consume.
    pub fn each_child(
        &mut self,
        mut handle: impl FnMut(&str, ElementReader<'_, I>) -> Result<()>,
    ) -> Result<()> {
        loop {
            while self.cursor.depth > self.level {
                match self.cursor.next() {
                    Some(event) => {
                        event?;
                    }
                    None => return Ok(()),
                }
            }
            let Some(event) = self.cursor.next() else {
                return Ok(());
            };
            match event? {
                XmlEvent::StartElement {
                    name, attributes, ..
                } => {
                    let child = ElementReader {
                        trail: self.child_trail(&name.local_name),
                        level: self.level + 1,
                        attributes,
                        cursor: &mut *self.cursor,
                    };
                    handle(&name.local_name, child)?;
                }
                XmlEvent::EndElement { .. } => return Ok(()),
                _ => {}
            }
        }
    }

    /// Consumes this element and returns its own character and CDATA
    /// content, trimmed. Text inside nested elements is not collected.
    /// `<geoReference>` carries its payload this way.
    pub fn text(mut self) -> Result<String> {
        let mut text = String::new();
        while self.cursor.depth >= self.level {
            let Some(event) = self.cursor.next() else {
                break;
            };
            match event? {
                XmlEvent::Characters(s) | XmlEvent::CData(s) => {
                    if self.cursor.depth == self.level {
                        text.push_str(&s);
                    }
                }
                _ => {}
            }
        }
        Ok(text.trim().to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("XML parsing failed: {0}")]
    Xml(#[from] xml::reader::Error),
    #[error("`{element}` requires a `{name}` attribute")]
    MissingAttribute { element: String, name: String },
    #[error("`{element}` requires a `{name}` child element")]
    MissingChild { element: String, name: String },
    #[error("cannot parse attribute `{name}` of `{element}` as {ty}: {cause}")]
    Attribute {
        element: String,
        name: String,
        ty: &'static str,
        cause: ParseError,
        trace: Box<Backtrace>,
    },
}

#[derive(Debug, derive_more::From, derive_more::Display)]
pub enum ParseError {
    Int(ParseIntError),
    Float(ParseFloatError),
    Bool(ParseBoolError),
    Variant(UnknownVariant),
}

impl From<Infallible> for ParseError {
    fn from(_: Infallible) -> Self {
        unreachable!()
    }
}

/// A string that matches none of an enum's known spellings.
#[derive(Debug)]
pub struct UnknownVariant {
    pub ty: &'static str,
    pub value: String,
}

impl Display for UnknownVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` is not a known {}", self.value, self.ty)
    }
}

/// Walks the children of `$reader`, parsing every recognised element into
/// its typed model and passing it to the matching consumer; unrecognised
/// children are dropped. An arm marked `required` must have matched at
/// least once by the end of the walk, otherwise the element is rejected.
#[macro_export]
macro_rules! read_children {
    ($reader:ident, $($name:literal $($req:ident)? => $ty:ty => $consumer:expr,)* $(,)?) => {
        let mut __missing: Vec<&'static str> = Vec::new();
        $($(
            {
                // the marker is spelled `required` at every use site
                let _ = stringify!($req);
                __missing.push($name);
            }
        )?)*

        $reader.each_child(|name, child| {
            $(
                if name.eq_ignore_ascii_case($name) {
                    let value = <$ty as TryFrom<_>>::try_from(child)?;
                    __missing.retain(|n| *n != $name);
                    let _ = ($consumer)(value);
                    return Ok(());
                }
            )*
            let _ = child;
            Ok(())
        })?;

        if let Some(&name) = __missing.first() {
            return Err($crate::parser::Error::MissingChild {
                element: $reader.trail().to_string(),
                name: name.to_string(),
            });
        }
    };
}

/// Implements the two directions of an enum's source spelling: `as_str` for
/// emission and a case-insensitive `FromStr` for parsing.
#[macro_export]
macro_rules! string_enum {
    ($ty:ident { $($value:ident => $name:literal),* $(,)? }) => {
        impl $ty {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$value => $name,)*
                }
            }
        }

        impl core::str::FromStr for $ty {
            type Err = $crate::parser::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($name) {
                        return Ok(Self::$value);
                    }
                )*
                Err($crate::parser::UnknownVariant {
                    ty: stringify!($ty),
                    value: s.to_string(),
                })
            }
        }
    };
}
