//! Ordered groups of node handles.
//!
//! Every navigation step yields a [`Collection`]. Scalar operations act on
//! the first member and fail with [`Error::EmptyCollection`] when there is
//! none; element-wise operations act on every member.

use std::ops::Index;
use std::slice;

use super::{Attributes, Node};
use crate::error::{Error, Result};
use crate::xml::SerializeOptions;

/// An ordered, possibly empty sequence of nodes from a tree.
///
/// Members are shared handles, never copies: mutating a member through a
/// collection mutates the tree it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    members: Vec<Node>,
}

impl Collection {
    /// Creates a collection from node handles.
    pub fn new(members: Vec<Node>) -> Self {
        Collection { members }
    }

    fn first_member(&self, operation: &'static str) -> Result<&Node> {
        self.members
            .first()
            .ok_or(Error::EmptyCollection { operation })
    }

    /// Consumes the collection and returns its first member.
    pub fn into_first(self, operation: &'static str) -> Result<Node> {
        self.members
            .into_iter()
            .next()
            .ok_or(Error::EmptyCollection { operation })
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if there are no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the first member, if any.
    pub fn first(&self) -> Option<&Node> {
        self.members.first()
    }

    /// Returns the member at `index`, if any.
    pub fn nth(&self, index: usize) -> Option<&Node> {
        self.members.get(index)
    }

    /// Returns the members as a slice.
    pub fn as_slice(&self) -> &[Node] {
        &self.members
    }

    /// Returns a copy of the member list. The handles still share their nodes.
    pub fn to_vec(&self) -> Vec<Node> {
        self.members.clone()
    }

    /// Returns an iterator over the members.
    pub fn iter(&self) -> slice::Iter<'_, Node> {
        self.members.iter()
    }

    // First-member delegation

    /// Returns the first member's name.
    pub fn name(&self) -> Result<String> {
        Ok(self.first_member("get name")?.name())
    }

    /// Renames the first member.
    pub fn set_name(&self, name: impl Into<String>) -> Result<()> {
        self.first_member("set name")?.set_name(name);
        Ok(())
    }

    /// Returns the first member's value.
    pub fn value(&self) -> Result<String> {
        Ok(self.first_member("get value")?.value())
    }

    /// Replaces the first member's value.
    pub fn set_value(&self, value: impl ToString) -> Result<()> {
        self.first_member("set value")?.set_value(value);
        Ok(())
    }

    /// Returns the first member's value as its string form.
    pub fn try_to_string(&self) -> Result<String> {
        Ok(self.first_member("get string value")?.to_string())
    }

    /// Returns the first member's attribute map.
    pub fn attributes(&self) -> Result<Attributes> {
        Ok(self.first_member("get attributes")?.attributes())
    }

    /// Bulk-sets attributes on the first member.
    pub fn set_attributes<I, K, V>(&self, attributes: I) -> Result<&Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: ToString,
        V: ToString,
    {
        self.first_member("set attributes")?
            .set_attributes(attributes);
        Ok(self)
    }

    /// Returns an attribute of the first member, or `""` if absent.
    pub fn attr(&self, name: &str) -> Result<String> {
        Ok(self.first_member("get attributes")?.attr(name))
    }

    /// Sets an attribute on the first member.
    pub fn set_attr(&self, name: impl ToString, value: impl ToString) -> Result<&Self> {
        self.first_member("set attributes")?.set_attr(name, value);
        Ok(self)
    }

    /// Bulk-sets attributes and a non-empty value on the first member.
    pub fn configure<I, K, V>(&self, attributes: I, value: impl ToString) -> Result<&Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: ToString,
        V: ToString,
    {
        self.first_member("configure")?
            .configure(attributes, value);
        Ok(self)
    }

    /// Returns the children of the first member.
    pub fn children(&self) -> Result<Vec<Node>> {
        Ok(self.first_member("get children")?.children())
    }

    /// Returns the parent of the first member.
    pub fn parent(&self) -> Result<Option<Node>> {
        Ok(self.first_member("get parent")?.parent())
    }

    /// Serializes the first member's subtree.
    pub fn to_xml(&self, options: &SerializeOptions) -> Result<String> {
        self.first_member("get XML")?.to_xml(options)
    }

    /// Appends a new empty child to the first member.
    pub fn add_child(&self, name: impl Into<String>) -> Result<Node> {
        Ok(self.first_member("add a child")?.add_child(name))
    }

    /// Appends a new child with attributes and value to the first member.
    pub fn add_child_with<I, K, V>(
        &self,
        name: impl Into<String>,
        attributes: I,
        value: impl ToString,
    ) -> Result<Node>
    where
        I: IntoIterator<Item = (K, V)>,
        K: ToString,
        V: ToString,
    {
        Ok(self
            .first_member("add a child")?
            .add_child_with(name, attributes, value))
    }

    /// Navigates to the first member's children named `name`, creating one
    /// if none exist. See [`Node::get`].
    pub fn get(&self, name: &str) -> Result<Collection> {
        Ok(self.first_member("get a child node")?.get(name))
    }

    /// Like [`Collection::get`] but never creates a node. An empty
    /// collection yields an empty collection.
    pub fn try_get(&self, name: &str) -> Collection {
        self.members
            .first()
            .map(|node| node.try_get(name))
            .unwrap_or_default()
    }

    /// Deep-copies the first member. See [`Node::deep_clone`].
    pub fn deep_clone(&self) -> Result<Node> {
        self.first_member("clone")?.deep_clone()
    }

    // Element-wise operations

    /// Maps every member.
    pub fn map<T, F>(&self, f: F) -> Vec<T>
    where
        F: FnMut(&Node) -> T,
    {
        self.members.iter().map(f).collect()
    }

    /// Calls `f` on every member.
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&Node),
    {
        self.members.iter().for_each(f)
    }

    /// Returns true if any member matches.
    pub fn some<F>(&self, mut f: F) -> bool
    where
        F: FnMut(&Node) -> bool,
    {
        self.members.iter().any(|n| f(n))
    }

    /// Returns true if every member matches. Vacuously true when empty.
    pub fn every<F>(&self, mut f: F) -> bool
    where
        F: FnMut(&Node) -> bool,
    {
        self.members.iter().all(|n| f(n))
    }

    /// Returns a new collection of the matching members. May be empty.
    pub fn filter<F>(&self, mut f: F) -> Collection
    where
        F: FnMut(&Node) -> bool,
    {
        self.members.iter().filter(|n| f(n)).cloned().collect()
    }

    /// Returns the first matching member as a bare node.
    pub fn find<F>(&self, mut f: F) -> Option<Node>
    where
        F: FnMut(&Node) -> bool,
    {
        self.members.iter().find(|n| f(n)).cloned()
    }

    // Structural mutation

    /// Detaches the children of every member, draining this collection.
    pub fn empty(&mut self) -> Result<()> {
        if self.members.is_empty() {
            return Err(Error::EmptyCollection { operation: "empty" });
        }
        while let Some(member) = self.members.pop() {
            member.empty();
        }
        Ok(())
    }

    /// Detaches every member from its parent, draining this collection.
    ///
    /// Stops at the first member that cannot be removed; that member and the
    /// ones before it stay in the collection.
    pub fn remove(&mut self) -> Result<()> {
        if self.members.is_empty() {
            return Err(Error::EmptyCollection { operation: "remove" });
        }
        while let Some(member) = self.members.last() {
            member.remove()?;
            self.members.pop();
        }
        Ok(())
    }
}

impl From<Vec<Node>> for Collection {
    fn from(members: Vec<Node>) -> Self {
        Collection::new(members)
    }
}

impl From<Node> for Collection {
    fn from(node: Node) -> Self {
        Collection::new(vec![node])
    }
}

impl FromIterator<Node> for Collection {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Collection::new(iter.into_iter().collect())
    }
}

impl Index<usize> for Collection {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        &self.members[index]
    }
}

impl IntoIterator for Collection {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Node;
    type IntoIter = slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
