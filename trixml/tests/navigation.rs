//! Behavior of parsing, navigation and mutation through the public API.

use pretty_assertions::assert_eq;
use trixml::{create_document, parse, Collection, Error, Node, SerializeOptions};

const SIBLINGS: &str = "<Root><B>b1</B><A>a1</A><A>a2</A><B>b2</B></Root>";

fn count_named(nodes: &[Node], name: &str) -> usize {
    nodes.iter().filter(|n| n.name() == name).count()
}

#[test]
fn parse_records_only_the_first_root() {
    let doc = parse(r#"<?xml version="1.0" encoding="UTF-8"?><A></A><B></B><C></C>"#).unwrap();
    assert_eq!(doc.len(), 1);
    assert_eq!(doc.name().unwrap(), "A");
}

#[test]
fn declaration_only_document_is_empty() {
    let doc = parse(r#"<?xml version="1.0" encoding="UTF-8"?>"#).unwrap();
    assert_eq!(doc.len(), 0);
    assert!(parse("").unwrap().is_empty());
}

#[test]
fn empty_document_rejects_first_member_operations() {
    let doc = parse("<!-- nothing here -->").unwrap();
    assert_eq!(doc.len(), 0);
    assert!(matches!(doc.value(), Err(Error::EmptyCollection { .. })));
    assert!(matches!(doc.attributes(), Err(Error::EmptyCollection { .. })));
    assert!(matches!(doc.children(), Err(Error::EmptyCollection { .. })));
    assert!(matches!(
        doc.to_xml(&SerializeOptions::default()),
        Err(Error::EmptyCollection { .. })
    ));
}

#[test]
fn navigating_missing_nodes_never_fails() {
    let doc = parse("<A></A>").unwrap();
    let deep = doc
        .get("B")
        .and_then(|b| b.get("C"))
        .and_then(|c| c.get("D"))
        .and_then(|d| d.get("E"))
        .unwrap();
    assert_eq!(deep.len(), 1);
}

#[test]
fn created_nodes_have_names_and_empty_attributes() {
    let doc = parse("<A></A>").unwrap();
    let d = doc.get("B").unwrap().get("C").unwrap().get("D").unwrap();
    assert_eq!(d.name().unwrap(), "D");
    assert_eq!(d.attr("attr-of-anon-node").unwrap(), "");
}

#[test]
fn navigation_creates_each_missing_node_once() {
    let doc = parse(SIBLINGS).unwrap();

    doc.get("B").unwrap();
    let children = doc.children().unwrap();
    assert_eq!(children.len(), 4);
    assert_eq!(count_named(&children, "B"), 2);

    let c = doc.get("C").unwrap();
    assert_eq!(c.len(), 1);
    let children = doc.children().unwrap();
    assert!(children.iter().any(|n| n.name() == "C"));
    assert_eq!(children.len(), 5);

    doc.get("B").unwrap();
    let again = doc.get("C").unwrap();
    let children = doc.children().unwrap();
    assert_eq!(children.len(), 5);
    assert_eq!(count_named(&children, "B"), 2);
    assert_eq!(again, c);
}

#[test]
fn try_get_leaves_tree_unchanged() {
    let doc = parse(SIBLINGS).unwrap();
    assert!(doc.try_get("C").is_empty());
    assert_eq!(doc.try_get("A").len(), 2);
    assert_eq!(doc.children().unwrap().len(), 4);
}

#[test]
fn string_value_is_first_match() {
    let doc = parse(SIBLINGS).unwrap();
    assert_eq!(doc.get("A").unwrap().try_to_string().unwrap(), "a1");
    assert_eq!(doc.get("A").unwrap()[0].to_string(), "a1");
}

#[test]
fn cdata_is_part_of_the_value() {
    let doc = parse("<Root><A><![CDATA[ok]]></A></Root>").unwrap();
    assert_eq!(doc.get("A").unwrap().value().unwrap(), "ok");
}

#[test]
fn cdata_and_text_concatenate_in_order() {
    let first = parse("<Root><A>a-<![CDATA[ok]]>! <![CDATA[yeah!]]></A></Root>").unwrap();
    assert_eq!(first.get("A").unwrap().value().unwrap(), "a-ok! yeah!");

    let second = parse("<Root><A><![CDATA[a-]]>ok<![CDATA[! ]]>yeah!</A></Root>").unwrap();
    assert_eq!(second.get("A").unwrap().value().unwrap(), "a-ok! yeah!");
}

#[test]
fn whitespace_only_cdata_is_kept() {
    let doc = parse("<Root><A>  <![CDATA[  ]]>  </A></Root>").unwrap();
    assert_eq!(doc.get("A").unwrap().value().unwrap(), "  ");
}

#[test]
fn comments_are_ignored() {
    let first = parse("<Root><A><!-- a comment! --></A></Root>").unwrap();
    assert_eq!(first.get("A").unwrap().value().unwrap(), "");

    let second = parse("<Root><A>1<!-- a comment! -->2</A></Root>").unwrap();
    assert_eq!(second.get("A").unwrap().value().unwrap(), "12");
}

#[test]
fn entity_references_keep_surrounding_spaces() {
    let doc = parse("<Root><A>&lt; &gt;</A></Root>").unwrap();
    assert_eq!(doc.get("A").unwrap().value().unwrap(), "< >");
}

#[test]
fn children_come_from_first_match_only() {
    let doc = parse("<Root><B><A>1</A></B><B><A>2</A></B></Root>").unwrap();
    assert_eq!(doc.get("B").unwrap().get("A").unwrap().value().unwrap(), "1");
    assert_eq!(doc.get("B").unwrap().children().unwrap().len(), 1);
}

#[test]
fn children_of_created_node_are_empty() {
    let doc = parse("<Root></Root>").unwrap();
    let b = doc.get("A").unwrap().get("B").unwrap();
    assert_eq!(b.children().unwrap().len(), 0);
}

#[test]
fn map_visits_matching_siblings_in_order() {
    let doc = parse(SIBLINGS).unwrap();
    assert_eq!(doc.get("A").unwrap().map(|a| a.value()).join(","), "a1,a2");
    assert_eq!(doc.get("B").unwrap().map(|b| b.value()).join(","), "b1,b2");
}

#[test]
fn filter_returns_possibly_empty_collection() {
    let doc = parse(SIBLINGS).unwrap();
    let a = doc.get("A").unwrap();
    let none: Collection = a.filter(|n| n.value() == "missing");
    assert_eq!(none.len(), 0);

    let second = a.filter(|n| n.value() == "a2");
    assert_eq!(second.len(), 1);
    assert_eq!(second.value().unwrap(), "a2");
}

#[test]
fn find_some_every_for_each() {
    let doc = parse(SIBLINGS).unwrap();
    let b = doc.get("B").unwrap();

    let found: Option<Node> = b.find(|n| n.value() == "b2");
    assert_eq!(found.map(|n| n.value()), Some("b2".to_string()));
    assert!(b.some(|n| n.value() == "b1"));
    assert!(b.every(|n| n.name() == "B"));

    let mut total = 0;
    b.for_each(|n| total += n.value().len());
    assert_eq!(total, 4);
}

#[test]
fn attributes_are_stringified() {
    let doc = parse(r#"<Root a="1"/>"#).unwrap();
    assert_eq!(doc.attr("a").unwrap(), "1");
    assert_eq!(doc.attr("missing").unwrap(), "");

    doc.set_attr("n", 5).unwrap().set_attributes([("x", 1.5)]).unwrap();
    let attrs = doc.attributes().unwrap();
    assert_eq!(attrs["n"], "5");
    assert_eq!(attrs["x"], "1.5");
}

#[test]
fn remove_and_empty_detach_nodes() {
    let doc = parse(SIBLINGS).unwrap();
    let root = doc[0].clone();

    let first_a = doc.get("A").unwrap()[0].clone();
    first_a.remove().unwrap();
    assert!(first_a.parent().is_none());
    assert_eq!(doc.get("A").unwrap().value().unwrap(), "a2");
    assert_eq!(root.child_count(), 3);

    assert!(matches!(root.remove(), Err(Error::DetachedNode)));

    let mut whole = doc.clone();
    whole.empty().unwrap();
    assert!(whole.is_empty());
    assert_eq!(root.child_count(), 0);
    assert_eq!(doc.len(), 1);
}

#[test]
fn removing_a_collection_removes_every_member() {
    let doc = parse(SIBLINGS).unwrap();
    let mut bs = doc.get("B").unwrap();
    bs.remove().unwrap();
    assert!(bs.is_empty());
    assert_eq!(doc.children().unwrap().len(), 2);
    assert!(doc.try_get("B").is_empty());
}

#[test]
fn deep_clone_is_independent() {
    let doc = parse(r#"<Root id="1"><A k="v">text</A><B/></Root>"#).unwrap();
    let copy = doc.deep_clone().unwrap();

    assert_eq!(copy.name(), "Root");
    assert_eq!(copy.attr("id"), "1");
    assert_eq!(copy.child_count(), 2);
    assert_eq!(copy.get("A").value().unwrap(), "text");

    copy.set_attr("id", "2");
    copy.get("A").set_value("changed").unwrap();
    copy.add_child("C");
    assert_eq!(doc.attr("id").unwrap(), "1");
    assert_eq!(doc.get("A").unwrap().value().unwrap(), "text");
    assert_eq!(doc.children().unwrap().len(), 2);
}

#[test]
fn malformed_input_is_a_parse_error() {
    assert!(matches!(parse("<a><b></a>"), Err(Error::Parse(_))));
    assert!(matches!(parse("<a>"), Err(Error::Parse(_))));
    assert!(matches!(parse("<a x='1' x='2'/>"), Err(Error::Parse(_))));
    assert!(matches!(parse("</a>"), Err(Error::Parse(_))));
}

#[test]
fn to_xml_round_trips_through_parse() {
    let source = r#"<feed><title>T &amp; U</title><entry id="1">one</entry><entry id="2">two</entry></feed>"#;
    let doc = parse(source).unwrap();
    let compact = doc.to_xml(&SerializeOptions::default().headless()).unwrap();
    assert_eq!(compact, source);

    let pretty = doc.to_xml(&SerializeOptions::default().pretty()).unwrap();
    assert_eq!(
        pretty,
        "<?xml version=\"1.0\"?>\n<feed>\n  <title>T &amp; U</title>\n  <entry id=\"1\">one</entry>\n  <entry id=\"2\">two</entry>\n</feed>"
    );
    let reparsed = parse(&pretty).unwrap();
    assert_eq!(reparsed.get("entry").unwrap().map(|e| e.attr("id")), ["1", "2"]);
}

#[test]
fn serialize_matches_to_xml() {
    let doc = create_document("note", [("to", "you")], "hi");
    let node = doc.first().unwrap();
    let options = SerializeOptions::default();
    assert_eq!(
        trixml::serialize(node, &options).unwrap(),
        node.to_xml(&options).unwrap()
    );
}

#[test]
fn configure_sets_attributes_and_value() {
    let doc = create_document("item", std::iter::empty::<(&str, &str)>(), "");
    doc.configure([("id", 3)], "body").unwrap();
    assert_eq!(doc.attr("id").unwrap(), "3");
    assert_eq!(doc.value().unwrap(), "body");
}

#[test]
fn parse_reader_matches_parse() {
    let source = "<Root><A>1</A></Root>";
    let doc = trixml::parse_reader(source.as_bytes()).unwrap();
    assert_eq!(doc.get("A").unwrap().value().unwrap(), "1");
}

#[test]
fn text_outside_the_root_is_a_parse_error() {
    assert!(matches!(parse("junk<a/>"), Err(Error::Parse(_))));
    assert!(matches!(parse("<a/>junk"), Err(Error::Parse(_))));
    assert!(matches!(parse("hello"), Err(Error::Parse(_))));
    assert_eq!(parse("\n  <a/>\n").unwrap().len(), 1);
}

#[test]
fn invalid_names_are_rejected() {
    assert!(matches!(parse("<1a/>"), Err(Error::Parse(_))));

    let doc = parse("<a/>").unwrap();
    doc.get("has space").unwrap();
    assert!(matches!(
        doc.to_xml(&SerializeOptions::default()),
        Err(Error::Serialize(_))
    ));
    assert!(matches!(doc.deep_clone(), Err(Error::Serialize(_))));
}

#[test]
fn pretty_mixed_content_reparses_to_the_same_values() {
    let doc = parse("<Root><A>lead<B>inner</B></A><C/></Root>").unwrap();
    let pretty = doc.to_xml(&SerializeOptions::default().pretty().headless()).unwrap();
    assert_eq!(pretty, "<Root>\n  <A>lead<B>inner</B></A>\n  <C/>\n</Root>");

    let reparsed = parse(&pretty).unwrap();
    let a = reparsed.get("A").unwrap();
    assert_eq!(a.value().unwrap(), "lead");
    assert_eq!(a.get("B").unwrap().value().unwrap(), "inner");
}
