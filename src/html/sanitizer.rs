use markup5ever_rcdom::{Handle, NodeData};

use crate::html::dom::{dom_to_html, fragment_root, get_node_name, html_to_dom, text_content};

/// Tags Medium accepts on paste, mapped to the attributes they may keep.
///
/// Everything else is stripped during sanitization, and the Markdown
/// renderer assumes its input never strays outside this set.
pub const MEDIUM_TAGS: &[(&str, &[&str])] = &[
    ("h1", &[]),
    ("h2", &[]),
    ("p", &[]),
    ("a", &["href"]),
    ("strong", &[]),
    ("b", &[]),
    ("em", &[]),
    ("i", &[]),
    ("blockquote", &[]),
    ("figure", &[]),
    ("figcaption", &[]),
    ("img", &["src", "alt"]),
    ("ul", &[]),
    ("ol", &[]),
    ("li", &[]),
    ("pre", &[]),
    ("code", &[]),
    ("hr", &[]),
    ("br", &[]),
];

fn allowed_attrs(tag_name: &str) -> Option<&'static [&'static str]> {
    MEDIUM_TAGS
        .iter()
        .find(|(name, _)| *name == tag_name)
        .map(|(_, attrs)| *attrs)
}

/// Reduce arbitrary HTML to the Medium-safe subset.
///
/// Runs two passes over the parsed tree: first `script` and `style`
/// elements are dropped with their entire content, then every remaining
/// element is checked against [`MEDIUM_TAGS`]. Unlisted elements are
/// unwrapped (their children stay, the tag goes); listed elements keep
/// only their whitelisted attributes. Comments and other non-element,
/// non-text nodes are dropped.
///
/// Idempotent: sanitizing already-sanitized markup is a no-op.
pub fn sanitize(html: &str) -> String {
    let dom = html_to_dom(html);

    if let Some(body) = fragment_root(&dom) {
        drop_unsafe_elements(&body);
        let filtered = filter_children(&body);
        *body.children.borrow_mut() = filtered;
    }

    dom_to_html(&dom)
}

/// Text content with every tag removed.
///
/// Used to decide whether sanitized markup still says anything at all.
pub fn strip_all_tags(html: &str) -> String {
    let dom = html_to_dom(html);

    match fragment_root(&dom) {
        Some(body) => text_content(&body),
        None => String::new(),
    }
}

/// Remove `script`/`style` subtrees wholesale.
///
/// The whitelist pass alone would unwrap them and leak their text; this
/// runs first so their content never survives.
fn drop_unsafe_elements(node: &Handle) {
    node.children
        .borrow_mut()
        .retain(|child| !matches!(get_node_name(child), Some("script" | "style")));

    let children: Vec<Handle> = node.children.borrow().clone();
    for child in children.iter() {
        drop_unsafe_elements(child);
    }
}

/// Filter a node's children against the whitelist, bottom-up.
///
/// Returns the replacement child list: kept elements stay in place with
/// filtered attributes and children, unlisted elements are replaced by
/// their own (already filtered) children.
fn filter_children(node: &Handle) -> Vec<Handle> {
    let children: Vec<Handle> = node.children.borrow().clone();
    let mut kept: Vec<Handle> = Vec::new();

    for child in children.iter() {
        match &child.data {
            NodeData::Element { name, attrs, .. } => {
                let filtered = filter_children(child);

                match allowed_attrs(name.local.as_ref()) {
                    Some(allowed) => {
                        attrs
                            .borrow_mut()
                            .retain(|attr| allowed.contains(&attr.name.local.as_ref()));
                        *child.children.borrow_mut() = filtered;
                        kept.push(child.clone());
                    }
                    None => {
                        // Detach before the unwrapped node is dropped: rcdom's
                        // Drop clears the children of every node it still
                        // lists, which would gut the kept descendants.
                        child.children.borrow_mut().clear();
                        kept.extend(filtered);
                    }
                }
            }
            NodeData::Text { .. } => {
                kept.push(child.clone());
            }
            _ => {}
        }
    }

    kept
}
