//! Search filtering over a component's property tree.
//!
//! A node matches when its name, whitespace removed, contains any search token
//! case-insensitively. Matches are kept together with their whole subtree;
//! composite nodes above a match are kept as headers so the match stays
//! reachable in the rendered tree.

use crate::property::PropertyNode;

/// Whitespace-separated, lower-cased search tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    tokens: Vec<String>,
}

impl SearchQuery {
    pub fn parse(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tokens: text.split_whitespace().map(str::to_lowercase).collect(),
        }
    }

    /// The raw text the query was parsed from.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// A query without tokens filters nothing; the render driver shows the full editor instead.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        if self.tokens.is_empty() {
            return false;
        }
        let stripped: String = name
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        self.tokens.iter().any(|token| stripped.contains(token.as_str()))
    }
}

/// One row of a filtered property view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEntry {
    /// For matches, the node with its complete subtree. For ancestors, a header-only copy.
    pub node: PropertyNode,
    /// `true` for direct matches: draw the node and everything beneath it.
    /// `false` for ancestors kept only to reach a match: draw the header.
    pub show_subtree_unfiltered: bool,
}

impl FilterEntry {
    pub fn is_match(&self) -> bool {
        self.show_subtree_unfiltered
    }
}

/// Pruned, ancestor-preserving view of one property tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterResult {
    entries: Vec<FilterEntry>,
}

impl FilterResult {
    pub fn entries(&self) -> &[FilterEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn matches(&self) -> impl Iterator<Item = &FilterEntry> {
        self.entries.iter().filter(|entry| entry.is_match())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterEntry> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a FilterResult {
    type Item = &'a FilterEntry;
    type IntoIter = std::slice::Iter<'a, FilterEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Filter the visible properties below `root` against `query`.
///
/// The root stands for the component itself and is never part of the result.
pub fn filter_tree(root: &PropertyNode, query: &SearchQuery) -> FilterResult {
    let mut entries = Vec::new();
    if !query.is_empty() {
        for child in root.visible_children() {
            collect(child, query, &mut entries);
        }
    }
    FilterResult { entries }
}

/// Depth-first accumulation. Returns whether `node` contributed any entry.
fn collect(node: &PropertyNode, query: &SearchQuery, out: &mut Vec<FilterEntry>) -> bool {
    if query.matches(node.name()) {
        out.push(FilterEntry {
            node: node.clone(),
            show_subtree_unfiltered: true,
        });
        return true;
    }

    if !node.is_composite() {
        return false;
    }

    // Header goes in first so it lands right above its first included child;
    // dropped again if nothing below it survived.
    let header_at = out.len();
    out.push(FilterEntry {
        node: node.header(),
        show_subtree_unfiltered: false,
    });

    let mut any_included = false;
    for child in node.visible_children() {
        any_included |= collect(child, query, out);
    }

    if !any_included {
        out.truncate(header_at);
    }
    any_included
}
