//! Tree construction from parse events.

use std::io::BufRead;

use tracing::debug;

use super::tokenizer::{ParseEvent, Tokenizer};
use crate::error::{Error, Result};
use crate::node::{Collection, Node};

/// Builds a node tree from a stream of [`ParseEvent`]s.
///
/// The first element opened becomes the document root and the only member
/// of the resulting collection. Later top-level elements are built but not
/// recorded anywhere.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    /// Currently open elements, innermost last.
    stack: Vec<Node>,
    root: Option<Node>,
    error: Option<String>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one event. Events after the first error are ignored.
    pub fn feed(&mut self, event: ParseEvent) {
        if self.error.is_some() {
            return;
        }
        match event {
            ParseEvent::Open { name, attributes } => {
                let node = Node::new(name);
                node.set_attributes(attributes);
                if let Some(parent) = self.stack.last() {
                    parent.append_child(node.clone());
                }
                if self.root.is_none() {
                    self.root = Some(node.clone());
                }
                self.stack.push(node);
            }
            ParseEvent::Close => {
                self.stack.pop();
            }
            ParseEvent::Text(text) => {
                if text.trim().is_empty() {
                    return;
                }
                if let Some(current) = self.stack.last() {
                    current.append_value(&text);
                }
            }
            ParseEvent::CData(text) => {
                if let Some(current) = self.stack.last() {
                    current.append_value(&text);
                }
            }
            ParseEvent::Comment(_) => {}
            ParseEvent::Error(message) => {
                self.error = Some(message);
            }
        }
    }

    /// Finishes building. Fails if any error event was seen.
    pub fn finish(self) -> Result<Collection> {
        if let Some(message) = self.error {
            debug!(error = %message, "XML parse failed");
            return Err(Error::Parse(message));
        }
        match self.root {
            Some(root) => {
                debug!(root = %root.name(), "parsed XML document");
                Ok(Collection::from(root))
            }
            None => {
                debug!("parsed XML document without a root element");
                Ok(Collection::default())
            }
        }
    }

    /// Feeds every event and finishes.
    pub fn build<I>(events: I) -> Result<Collection>
    where
        I: IntoIterator<Item = ParseEvent>,
    {
        let mut builder = TreeBuilder::new();
        for event in events {
            builder.feed(event);
        }
        builder.finish()
    }
}

/// Parses XML from a string.
pub fn parse_str(xml: &str) -> Result<Collection> {
    TreeBuilder::build(Tokenizer::from_str(xml))
}

/// Parses XML from a buffered reader.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Collection> {
    TreeBuilder::build(Tokenizer::from_reader(reader))
}
