//! Translation of node subtrees into builder calls.

use super::builder::XmlBuilder;
use super::printer::SerializeOptions;
use crate::error::Result;
use crate::node::Node;

/// Serializes `node` and its descendants to XML text.
///
/// The node itself becomes the builder root; every descendant becomes a child
/// element carrying its attributes and, when non-empty, its value. Parent
/// links are never followed.
pub fn serialize(node: &Node, options: &SerializeOptions) -> Result<String> {
    let inner = node.borrow();
    let mut root = XmlBuilder::create(inner.name());
    root.attributes(inner.attributes()).text(inner.value());
    emit_children(node, &mut root);
    root.end(options)
}

fn emit_children(node: &Node, builder: &mut XmlBuilder) {
    let inner = node.borrow();
    for child in inner.children() {
        let child_inner = child.borrow();
        let element = builder.element(child_inner.name());
        element.attributes(child_inner.attributes());
        if !child_inner.value().is_empty() {
            element.text(child_inner.value());
        }
        emit_children(child, element);
    }
}
