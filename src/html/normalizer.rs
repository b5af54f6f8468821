use std::sync::LazyLock;

use markup5ever_rcdom::{Handle, NodeData, RcDom};
use regex::Regex;

use crate::html::dom::{
    dom_to_html, find_nodes, fragment_root, get_node_attr, get_node_name, html_to_dom,
    new_element, new_text, set_node_attr,
};
use crate::html::sanitizer::sanitize;

static BLOCK_COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--\s*/?wp:.*?-->").unwrap());

static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Marker class the block editor puts on gallery containers.
const GALLERY_CLASS: &str = "wp-block-gallery";

/// Turn raw block-editor HTML into whitelist-ready HTML.
///
/// Order matters: galleries are flattened while their marker class is
/// still present, and the final sanitize pass assumes every earlier step
/// already ran.
///
/// 1. Strip block-editor comment markers.
/// 2. Demote `h3`–`h6` to `h2` (Medium has two heading tiers).
/// 3. Fold each table into a single paragraph of its text.
/// 4. Flatten gallery containers into one `figure` per image.
/// 5. Strip all `class` and `style` attributes.
/// 6. Sanitize against the Medium whitelist.
///
/// Never fails: malformed markup parses into a recovery tree and flows
/// through the same passes.
pub fn normalize(raw_html: &str) -> String {
    let without_markers = BLOCK_COMMENTS.replace_all(raw_html, "");

    let dom = html_to_dom(&without_markers);
    if let Some(body) = fragment_root(&dom) {
        demote_headings(&dom, &body);
        fold_tables(&dom, &body);
        flatten_galleries(&dom, &body);
        strip_presentation_attrs(&body);
    }

    sanitize(&dom_to_html(&dom))
}

/// Replace every `h3`–`h6` with an `h2` carrying the same children.
///
/// Element names are immutable in the rcdom tree, so demotion builds a
/// fresh node and swaps it into the parent's child list. Attributes are
/// dropped with the old heading.
fn demote_headings(dom: &RcDom, node: &Handle) {
    let children: Vec<Handle> = node.children.borrow().clone();

    for (i, child) in children.iter().enumerate() {
        if matches!(get_node_name(child), Some("h3" | "h4" | "h5" | "h6")) {
            let heading = new_element(dom, "h2", vec![]);
            *heading.children.borrow_mut() = child.children.borrow().clone();
            child.children.borrow_mut().clear();
            node.children.borrow_mut()[i] = heading.clone();
            demote_headings(dom, &heading);
        } else {
            demote_headings(dom, child);
        }
    }
}

/// Replace each table with one paragraph holding its flattened text.
///
/// Medium has no table primitive. Inline emphasis, links and line breaks
/// survive; everything else is reduced to text with whitespace runs
/// collapsed to single spaces.
fn fold_tables(dom: &RcDom, node: &Handle) {
    let children: Vec<Handle> = node.children.borrow().clone();

    for (i, child) in children.iter().enumerate() {
        if get_node_name(child) == Some("table") {
            let paragraph = new_element(dom, "p", vec![]);
            let mut inline: Vec<Handle> = Vec::new();
            fold_inline_content(dom, child, &mut inline);
            *paragraph.children.borrow_mut() = inline;
            collapse_whitespace(&paragraph);
            trim_edge_text(&paragraph);
            node.children.borrow_mut()[i] = paragraph;
        } else {
            fold_tables(dom, child);
        }
    }
}

/// Walk a subtree keeping text plus `strong`/`em`/`a`/`br`, unwrapping
/// everything else. Script and style bodies are skipped outright.
fn fold_inline_content(dom: &RcDom, node: &Handle, out: &mut Vec<Handle>) {
    for child in node.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => {
                out.push(new_text(&contents.borrow()));
            }
            NodeData::Element { name, attrs, .. } => match name.local.as_ref() {
                "strong" | "em" | "a" => {
                    let carried: Vec<(String, String)> = attrs
                        .borrow()
                        .iter()
                        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                        .collect();
                    let wrapper = new_element(
                        dom,
                        name.local.as_ref(),
                        carried
                            .iter()
                            .map(|(attr_name, attr_value)| {
                                (attr_name.as_str(), attr_value.as_str())
                            })
                            .collect(),
                    );
                    let mut inner: Vec<Handle> = Vec::new();
                    fold_inline_content(dom, child, &mut inner);
                    *wrapper.children.borrow_mut() = inner;
                    out.push(wrapper);
                }
                "br" => {
                    out.push(new_element(dom, "br", vec![]));
                }
                "script" | "style" => {}
                _ => {
                    fold_inline_content(dom, child, out);
                }
            },
            _ => {}
        }
    }
}

fn collapse_whitespace(node: &Handle) {
    for child in node.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => {
                let collapsed = WHITESPACE_RUNS
                    .replace_all(contents.borrow().as_ref(), " ")
                    .to_string();
                let mut contents_mut = contents.borrow_mut();
                contents_mut.clear();
                contents_mut.push_slice(&collapsed);
            }
            _ => collapse_whitespace(child),
        }
    }
}

fn trim_edge_text(node: &Handle) {
    let children = node.children.borrow();

    if let Some(first) = children.first() {
        if let NodeData::Text { contents } = &first.data {
            let trimmed = contents.borrow().trim_start().to_string();
            let mut contents_mut = contents.borrow_mut();
            contents_mut.clear();
            contents_mut.push_slice(&trimmed);
        }
    }

    if let Some(last) = children.last() {
        if let NodeData::Text { contents } = &last.data {
            let trimmed = contents.borrow().trim_end().to_string();
            let mut contents_mut = contents.borrow_mut();
            contents_mut.clear();
            contents_mut.push_slice(&trimmed);
        }
    }
}

/// Replace each gallery container with one bare `figure` per image.
///
/// Only `src` and `alt` survive; captions and layout wrappers are
/// discarded. A gallery without images disappears entirely.
fn flatten_galleries(dom: &RcDom, node: &Handle) {
    let children: Vec<Handle> = node.children.borrow().clone();
    let mut rebuilt: Vec<Handle> = Vec::new();
    let mut found_gallery = false;

    for child in children.iter() {
        if is_gallery(child) {
            found_gallery = true;

            for img in find_nodes(child, "img") {
                let src = get_node_attr(&img, "src");
                let alt = get_node_attr(&img, "alt");
                let mut img_attrs: Vec<(&str, &str)> = Vec::new();
                if let Some(ref src) = src {
                    img_attrs.push(("src", src));
                }
                if let Some(ref alt) = alt {
                    img_attrs.push(("alt", alt));
                }

                let figure = new_element(dom, "figure", vec![]);
                figure
                    .children
                    .borrow_mut()
                    .push(new_element(dom, "img", img_attrs));
                rebuilt.push(figure);
            }
        } else {
            flatten_galleries(dom, child);
            rebuilt.push(child.clone());
        }
    }

    if found_gallery {
        *node.children.borrow_mut() = rebuilt;
    }
}

fn is_gallery(node: &Handle) -> bool {
    get_node_attr(node, "class").map_or(false, |class| class.contains(GALLERY_CLASS))
}

fn strip_presentation_attrs(node: &Handle) {
    if let NodeData::Element { .. } = node.data {
        set_node_attr(node, "class", None);
        set_node_attr(node, "style", None);
    }

    for child in node.children.borrow().iter() {
        strip_presentation_attrs(child);
    }
}
