//! trixml - navigable XML trees with a path-like API
//!
//! Parse a document and walk it by tag name. Navigating to a name returns a
//! [`Collection`] of every matching child; navigating to a name that does not
//! exist creates an empty child with that name, so chains of lookups never
//! fail on missing elements.
//!
//! ```
//! use trixml::{parse, SerializeOptions};
//!
//! let doc = parse("<feed><title>Hello</title><entry>a</entry><entry>b</entry></feed>")?;
//! assert_eq!(doc.get("title")?.value()?, "Hello");
//! assert_eq!(doc.get("entry")?.map(|e| e.value()), ["a", "b"]);
//!
//! // Missing elements are created on first access
//! doc.get("author")?.get("name")?.set_value("Ann")?;
//! let xml = doc.to_xml(&SerializeOptions::default().headless())?;
//! assert!(xml.contains("<author><name>Ann</name></author>"));
//! # Ok::<(), trixml::Error>(())
//! ```
//!
//! # Single-threaded
//!
//! Nodes are shared through `Rc<RefCell<..>>`, so trees are neither `Send` nor
//! `Sync`. Reads such as [`Node::get`] may mutate the tree.

pub mod error;
pub mod node;
pub mod xml;

pub use error::{Error, Result};
pub use node::{Attributes, Collection, Node, NodeInner};
pub use xml::{
    parse_reader, serialize, ParseEvent, SerializeOptions, Tokenizer, TreeBuilder, XmlBuilder,
    XmlPrinter,
};

/// Parses an XML document.
///
/// Returns a collection holding the document's root element, or an empty
/// collection if the document has none. Only the first top-level element is
/// recorded. Fails with [`Error::Parse`] on malformed input; no partial tree
/// is ever returned.
pub fn parse(xml: &str) -> Result<Collection> {
    xml::parse_str(xml)
}

/// Creates a single-node document for building XML programmatically.
pub fn create_document<I, K, V>(
    name: impl Into<String>,
    attributes: I,
    value: impl ToString,
) -> Collection
where
    I: IntoIterator<Item = (K, V)>,
    K: ToString,
    V: ToString,
{
    Collection::from(Node::with_content(name, attributes, value))
}
