//! An owned element tree that renders to XML text.

use std::collections::BTreeMap;

use super::is_valid_name;
use super::printer::{SerializeOptions, XmlPrinter};
use crate::error::{Error, Result};

/// A detached element under construction.
///
/// Text is emitted before child elements. Attributes are kept sorted so the
/// output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlBuilder {
    name: String,
    attributes: BTreeMap<String, String>,
    text: String,
    children: Vec<XmlBuilder>,
}

impl XmlBuilder {
    /// Starts a new element.
    pub fn create(name: impl Into<String>) -> Self {
        XmlBuilder {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets attributes from key/value pairs.
    pub fn attributes<I, K, V>(&mut self, attributes: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: ToString,
        V: ToString,
    {
        for (key, value) in attributes {
            self.attributes.insert(key.to_string(), value.to_string());
        }
        self
    }

    /// Appends text content.
    pub fn text(&mut self, text: &str) -> &mut Self {
        self.text.push_str(text);
        self
    }

    /// Appends a child element and returns it for further building.
    pub fn element(&mut self, name: impl Into<String>) -> &mut XmlBuilder {
        self.children.push(XmlBuilder::create(name));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Returns the element name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attributes in sorted order.
    pub fn attribute_map(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Returns the accumulated text.
    pub fn text_content(&self) -> &str {
        &self.text
    }

    /// Returns the child elements.
    pub fn children(&self) -> &[XmlBuilder] {
        &self.children
    }

    /// Renders the whole tree to a string.
    pub fn end(&self, options: &SerializeOptions) -> Result<String> {
        self.check_names()?;
        let mut output = Vec::new();
        {
            let mut printer = XmlPrinter::with_options(&mut output, options.clone());
            printer.print(self)?;
        }
        String::from_utf8(output).map_err(|e| Error::Serialize(e.to_string()))
    }

    fn check_names(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::Serialize("missing element name".to_string()));
        }
        if !is_valid_name(&self.name) {
            return Err(Error::Serialize(format!(
                "invalid element name {:?}",
                self.name
            )));
        }
        if let Some(key) = self.attributes.keys().find(|key| !is_valid_name(key)) {
            return Err(Error::Serialize(format!(
                "invalid attribute name {:?} on <{}>",
                key, self.name
            )));
        }
        self.children.iter().try_for_each(XmlBuilder::check_names)
    }
}
