//! Node structures for the navigable XML tree.
//!
//! A [`Node`] is a cheap, cloneable handle to a shared element. Cloning the
//! handle never copies the element; use [`Node::deep_clone`] for that. Each
//! node owns its children and refers back to its parent through a weak
//! reference, so a tree is freed as soon as the last handle to its root goes
//! away.

mod collection;

pub use collection::Collection;

use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::xml::{self, SerializeOptions};

/// Attribute map of a node. Keys and values are always strings.
pub type Attributes = HashMap<String, String>;

/// The inner data of an element in the tree.
///
/// Each node has:
/// - a tag name
/// - a string attribute map
/// - a text value (all text and CDATA directly inside the element)
/// - 0 or more children, in document order
/// - a parent (except for roots and detached nodes)
#[derive(Debug, Default)]
pub struct NodeInner {
    /// Tag name.
    name: String,
    /// Attributes, stringified on every write.
    attributes: Attributes,
    /// Concatenated text content.
    value: String,
    /// Child elements.
    children: Vec<Node>,
    /// Weak reference to the parent node. Only used for detaching.
    parent: Weak<RefCell<NodeInner>>,
}

impl NodeInner {
    /// Returns the tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attribute map.
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns the text value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the children as a slice.
    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// A shared handle to an element in the tree.
///
/// Equality is identity: two handles are equal when they point at the same
/// element.
#[derive(Clone)]
pub struct Node(Rc<RefCell<NodeInner>>);

impl Node {
    /// Creates a new detached node with no attributes and an empty value.
    pub fn new(name: impl Into<String>) -> Self {
        Node(Rc::new(RefCell::new(NodeInner {
            name: name.into(),
            ..NodeInner::default()
        })))
    }

    /// Creates a new detached node with the given attributes and value.
    pub fn with_content<I, K, V>(
        name: impl Into<String>,
        attributes: I,
        value: impl ToString,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: ToString,
        V: ToString,
    {
        let node = Node::new(name);
        node.set_attributes(attributes);
        node.set_value(value);
        node
    }

    /// Parses an XML document. See [`crate::parse`].
    pub fn parse(xml: &str) -> Result<Collection> {
        xml::parse_str(xml)
    }

    /// Immutably borrows the inner data.
    ///
    /// Panics if the node is being mutated, so do not hold the guard across
    /// calls that change this node.
    pub fn borrow(&self) -> Ref<'_, NodeInner> {
        self.0.borrow()
    }

    /// Returns true if both handles refer to the same element.
    pub fn ptr_eq(a: &Node, b: &Node) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Returns the tag name.
    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    /// Renames this node.
    pub fn set_name(&self, name: impl Into<String>) {
        self.0.borrow_mut().name = name.into();
    }

    /// Returns the text value.
    pub fn value(&self) -> String {
        self.0.borrow().value.clone()
    }

    /// Replaces the text value.
    pub fn set_value(&self, value: impl ToString) {
        self.0.borrow_mut().value = value.to_string();
    }

    pub(crate) fn append_value(&self, text: &str) {
        self.0.borrow_mut().value.push_str(text);
    }

    /// Returns a copy of the full attribute map.
    pub fn attributes(&self) -> Attributes {
        self.0.borrow().attributes.clone()
    }

    /// Sets every given attribute, stringifying keys and values.
    pub fn set_attributes<I, K, V>(&self, attributes: I) -> &Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: ToString,
        V: ToString,
    {
        let mut inner = self.0.borrow_mut();
        for (key, value) in attributes {
            inner.attributes.insert(key.to_string(), value.to_string());
        }
        drop(inner);
        self
    }

    /// Returns the value of the named attribute, or `""` if it is absent.
    pub fn attr(&self, name: &str) -> String {
        self.0
            .borrow()
            .attributes
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    /// Sets a single attribute, stringifying the value.
    pub fn set_attr(&self, name: impl ToString, value: impl ToString) -> &Self {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Returns true if the named attribute is present.
    pub fn has_attr(&self, name: &str) -> bool {
        self.0.borrow().attributes.contains_key(name)
    }

    /// Removes the named attribute, returning its old value.
    pub fn remove_attr(&self, name: &str) -> Option<String> {
        self.0.borrow_mut().attributes.remove(name)
    }

    /// Bulk-sets attributes and, when `value` is non-empty, replaces the value.
    pub fn configure<I, K, V>(&self, attributes: I, value: impl ToString) -> &Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: ToString,
        V: ToString,
    {
        self.set_attributes(attributes);
        let value = value.to_string();
        if !value.is_empty() {
            self.set_value(value);
        }
        self
    }

    /// Returns handles to the direct children, in document order.
    pub fn children(&self) -> Vec<Node> {
        self.0.borrow().children.clone()
    }

    /// Returns the number of direct children.
    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    /// Returns the parent node, if this node is attached.
    pub fn parent(&self) -> Option<Node> {
        self.0.borrow().parent.upgrade().map(Node)
    }

    /// Appends `child` and points its parent link at this node.
    pub(crate) fn append_child(&self, child: Node) {
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child);
    }

    /// Appends a new empty child element and returns it.
    pub fn add_child(&self, name: impl Into<String>) -> Node {
        let child = Node::new(name);
        self.append_child(child.clone());
        child
    }

    /// Appends a new child element with the given attributes and value.
    pub fn add_child_with<I, K, V>(
        &self,
        name: impl Into<String>,
        attributes: I,
        value: impl ToString,
    ) -> Node
    where
        I: IntoIterator<Item = (K, V)>,
        K: ToString,
        V: ToString,
    {
        let child = Node::with_content(name, attributes, value);
        self.append_child(child.clone());
        child
    }

    /// Returns all direct children named `name`.
    ///
    /// This is a mutating read: when no child matches, one empty child with
    /// that name is appended and returned. Later calls find the created child,
    /// so a missing name is created at most once.
    pub fn get(&self, name: &str) -> Collection {
        let found = self.try_get(name);
        if !found.is_empty() {
            return found;
        }
        debug!(parent = %self.name(), child = name, "creating missing child");
        Collection::new(vec![self.add_child(name)])
    }

    /// Returns all direct children named `name` without creating anything.
    pub fn try_get(&self, name: &str) -> Collection {
        self.0
            .borrow()
            .children
            .iter()
            .filter(|c| c.0.borrow().name == name)
            .cloned()
            .collect()
    }

    /// Detaches this node from its parent.
    pub fn remove(&self) -> Result<()> {
        let parent = self.parent().ok_or(Error::DetachedNode)?;
        {
            let mut parent_inner = parent.0.borrow_mut();
            let index = parent_inner
                .children
                .iter()
                .position(|c| Node::ptr_eq(c, self))
                .ok_or(Error::DetachedNode)?;
            parent_inner.children.remove(index);
        }
        self.0.borrow_mut().parent = Weak::new();
        trace!(node = %self.name(), parent = %parent.name(), "removed node");
        Ok(())
    }

    /// Detaches every direct child. Grandchildren stay attached to their
    /// own parents.
    pub fn empty(&self) {
        let children = std::mem::take(&mut self.0.borrow_mut().children);
        for child in &children {
            child.0.borrow_mut().parent = Weak::new();
        }
        trace!(node = %self.name(), count = children.len(), "emptied node");
    }

    /// Serializes this subtree to XML text.
    pub fn to_xml(&self, options: &SerializeOptions) -> Result<String> {
        xml::serialize(self, options)
    }

    /// Produces a fully independent copy of this subtree by serializing it
    /// and parsing the result. The copy has no parent.
    pub fn deep_clone(&self) -> Result<Node> {
        let text = self.to_xml(&SerializeOptions::default())?;
        xml::parse_str(&text)?.into_first("clone")
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Node::ptr_eq(self, other)
    }
}

impl Eq for Node {}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.borrow().value)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.0.borrow();
        f.debug_struct("Node")
            .field("name", &inner.name)
            .field("attributes", &inner.attributes)
            .field("value", &inner.value)
            .field("children", &inner.children)
            .finish()
    }
}
