//! XML parsing and output.
//!
//! Parsing runs quick-xml through a [`Tokenizer`] and feeds the resulting
//! events to a [`TreeBuilder`]. Output goes the other way: a node subtree is
//! copied into an [`XmlBuilder`], which an [`XmlPrinter`] renders as text.

mod builder;
mod parser;
mod printer;
mod serializer;
mod tokenizer;

pub use builder::XmlBuilder;
pub use parser::{parse_reader, parse_str, TreeBuilder};
pub use printer::{SerializeOptions, XmlPrinter};
pub use serializer::serialize;
pub use tokenizer::{ParseEvent, Tokenizer};

/// Returns true if `name` can be written as an element or attribute name.
///
/// Prefixed names such as `atom:link` are accepted as a whole.
pub(crate) fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        None => false,
        Some(first) if first.is_ascii_digit() || first == '-' || first == '.' => false,
        Some(_) => name
            .chars()
            .all(|c| !c.is_whitespace() && !matches!(c, '<' | '>' | '&' | '"' | '\'' | '=' | '/')),
    }
}
