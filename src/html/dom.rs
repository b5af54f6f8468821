use std::cell::RefCell;

use html5ever::interface::{Attribute, QualName};
use html5ever::serialize::{serialize, SerializeOpts};
use html5ever::tendril::{format_tendril, TendrilSink};
use html5ever::tree_builder::create_element;
use html5ever::{namespace_url, ns, parse_document, LocalName};
use markup5ever_rcdom::{Handle, Node, NodeData, RcDom, SerializableHandle};

/// Parse an HTML string into a DOM.
///
/// The parser is error-tolerant; malformed markup never fails, it just
/// produces the recovery tree a browser would. Fragment input is wrapped
/// in the usual `html`/`body` scaffolding, which [`dom_to_html`] peels
/// off again.
pub fn html_to_dom(html: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(html)
}

/// Serialize the body of a DOM back to an HTML fragment string.
pub fn dom_to_html(dom: &RcDom) -> String {
    let mut buf: Vec<u8> = Vec::new();

    if let Some(body) = fragment_root(dom) {
        let serializable: SerializableHandle = body.into();
        serialize(&mut buf, &serializable, SerializeOpts::default())
            .expect("Unable to serialize DOM into buffer");
    }

    String::from_utf8_lossy(&buf).to_string()
}

/// The `body` element holding all fragment content.
pub fn fragment_root(dom: &RcDom) -> Option<Handle> {
    let html = get_child_node_by_name(&dom.document, "html")?;
    get_child_node_by_name(&html, "body")
}

pub fn get_child_node_by_name(parent: &Handle, node_name: &str) -> Option<Handle> {
    let children = parent.children.borrow();
    let matching_children = children.iter().find(|child| match child.data {
        NodeData::Element { ref name, .. } => &*name.local == node_name,
        _ => false,
    });
    matching_children.cloned()
}

pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => {
            for attr in attrs.borrow().iter() {
                if &*attr.name.local == attr_name {
                    return Some(attr.value.to_string());
                }
            }
            None
        }
        _ => None,
    }
}

pub fn set_node_attr(node: &Handle, attr_name: &str, attr_value: Option<String>) {
    if let NodeData::Element { attrs, .. } = &node.data {
        let attrs_mut = &mut attrs.borrow_mut();
        let mut i = 0;
        let mut found_existing_attr: bool = false;

        while i < attrs_mut.len() {
            if &attrs_mut[i].name.local == attr_name {
                found_existing_attr = true;

                if let Some(attr_value) = attr_value.clone() {
                    let _ = &attrs_mut[i].value.clear();
                    let _ = &attrs_mut[i].value.push_slice(attr_value.as_str());
                } else {
                    attrs_mut.remove(i);
                    continue;
                }
            }

            i += 1;
        }

        if !found_existing_attr {
            if let Some(attr_value) = attr_value.clone() {
                attrs_mut.push(Attribute {
                    name: QualName::new(None, ns!(), LocalName::from(attr_name)),
                    value: format_tendril!("{}", attr_value),
                });
            }
        }
    };
}

/// Collect all descendant nodes bearing the given element name.
pub fn find_nodes(node: &Handle, node_name: &str) -> Vec<Handle> {
    let mut found_nodes = Vec::new();

    if let NodeData::Element { ref name, .. } = node.data {
        if &*name.local == node_name {
            found_nodes.push(node.clone());
        }
    }

    for child_node in node.children.borrow().iter() {
        found_nodes.append(&mut find_nodes(child_node, node_name));
    }

    found_nodes
}

/// Create a detached element node owned by the given DOM.
pub fn new_element(dom: &RcDom, name: &str, attrs: Vec<(&str, &str)>) -> Handle {
    create_element(
        dom,
        QualName::new(None, ns!(), LocalName::from(name)),
        attrs
            .into_iter()
            .map(|(attr_name, attr_value)| Attribute {
                name: QualName::new(None, ns!(), LocalName::from(attr_name)),
                value: format_tendril!("{}", attr_value),
            })
            .collect(),
    )
}

/// Create a detached text node.
pub fn new_text(text: &str) -> Handle {
    Node::new(NodeData::Text {
        contents: RefCell::new(format_tendril!("{}", text)),
    })
}

/// Concatenated text content of a node's subtree.
///
/// Script and style bodies are never treated as text, no matter where
/// they appear.
pub fn text_content(node: &Handle) -> String {
    let mut result = String::new();
    append_text_content(node, &mut result);
    result
}

fn append_text_content(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => {
            out.push_str(&contents.borrow());
        }
        NodeData::Element { name, .. } => {
            if matches!(name.local.as_ref(), "script" | "style") {
                return;
            }
            for child in node.children.borrow().iter() {
                append_text_content(child, out);
            }
        }
        _ => {
            for child in node.children.borrow().iter() {
                append_text_content(child, out);
            }
        }
    }
}
