use crate::rst::{Doctree, Node};

/// Title of the section whose first paragraph becomes the feed description.
pub const ABSTRACT_TITLE: &str = "Abstract";

/// Return the trimmed rest of the first line that starts with `label`.
pub fn find_field<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    text.lines()
        .find_map(|line| line.strip_prefix(label))
        .map(str::trim)
}

/// Return the first paragraph of the first section titled exactly `Abstract`.
///
/// Sections are visited depth-first in document order. Only the first matching section counts,
/// even if it has no paragraph and a later one does.
pub fn find_abstract(tree: &Doctree) -> Option<String> {
    let section = find_section(&tree.nodes, ABSTRACT_TITLE)?;
    section.iter().find_map(|child| match child {
        Node::Paragraph(text) => Some(text.clone()),
        _ => None,
    })
}

fn find_section<'a>(nodes: &'a [Node], title: &str) -> Option<&'a [Node]> {
    nodes.iter().find_map(|node| match node {
        Node::Section {
            title: t,
            children,
        } if t == title => Some(children.as_slice()),
        Node::Section { children, .. } => find_section(children, title),
        _ => None,
    })
}
