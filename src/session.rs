//! One inspector session: the state a render driver reads every tick.
//!
//! A tick runs strictly in order: poll the watcher, rebuild groups and
//! reconcile the cache if the structure changed, then refresh filter output
//! while a search is active. Everything a render pass reads was completed
//! earlier in the same tick.

use bevy::log::debug;

use crate::cache::{CachedFilter, EditorCache, GroupView, Reconciled, ViewState};
use crate::error::InspectorError;
use crate::filter::{FilterResult, SearchQuery, filter_tree};
use crate::grouping::{GroupKey, group_components};
use crate::host::{HostTypes, InspectorHost, SelectionSet};
use crate::watcher::SelectionWatcher;

/// Session-level knobs, usually taken from the inspector settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Fold state given to groups seen for the first time.
    pub default_expanded: bool,
    /// Poll the watcher every tick. When off, only explicit rebuild requests rebuild.
    pub poll_every_tick: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            default_expanded: true,
            poll_every_tick: true,
        }
    }
}

/// What a call to [`InspectorSession::tick`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub rebuilt: bool,
    pub reconciled: Reconciled,
    pub filtered: usize,
}

pub struct InspectorSession<T: HostTypes> {
    options: SessionOptions,
    watcher: SelectionWatcher<T>,
    cache: EditorCache<T>,
    query: SearchQuery,
    rebuild_requested: bool,
}

impl<T: HostTypes> Default for InspectorSession<T> {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}

impl<T: HostTypes> InspectorSession<T> {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            options,
            watcher: SelectionWatcher::new(),
            cache: EditorCache::new(),
            query: SearchQuery::default(),
            rebuild_requested: false,
        }
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    pub fn set_options(&mut self, options: SessionOptions) {
        self.options = options;
    }

    /// Rebuild on the next tick even if the watcher sees no change.
    pub fn request_rebuild(&mut self) {
        self.rebuild_requested = true;
    }

    /// Run one refresh cycle against `host`.
    pub fn tick<H: InspectorHost<Types = T>>(&mut self, host: &H) -> TickReport {
        let mut report = TickReport::default();

        let changed = self.options.poll_every_tick && self.watcher.poll(host);
        if changed || std::mem::take(&mut self.rebuild_requested) {
            report.reconciled = self.rebuild(host);
            report.rebuilt = true;
        }

        report.filtered = self.refresh_filters(host);

        report
    }

    /// Recompute groups for the current selection and reconcile view state.
    pub fn rebuild<H: InspectorHost<Types = T>>(&mut self, host: &H) -> Reconciled {
        let selection = SelectionSet::new(host.current_selection());
        let groups = group_components(host, &selection);

        let default_expanded = self.options.default_expanded;
        let reconciled = self
            .cache
            .reconcile(host, groups, || ViewState::with_expanded(default_expanded));

        debug!(
            "Inspector rebuilt: {} groups ({} kept, {} new, {} dropped)",
            self.cache.len(),
            reconciled.kept,
            reconciled.created,
            reconciled.dropped
        );
        reconciled
    }

    /// Groups in render order, each with its editor and view state.
    pub fn current_groups(&self) -> &[GroupView<T>] {
        self.cache.views()
    }

    pub fn group(&self, key: &GroupKey<T>) -> Option<&GroupView<T>> {
        self.cache.get(key)
    }

    /// Advisory notices, one per group that cannot be edited as a whole.
    pub fn notices(&self) -> impl Iterator<Item = (GroupKey<T>, &InspectorError)> {
        self.cache
            .views()
            .iter()
            .filter_map(|view| Some((view.key(), view.notice()?)))
    }

    pub fn set_search_text(&mut self, text: &str) {
        if self.query.text() != text {
            self.query = SearchQuery::parse(text);
        }
    }

    pub fn search_text(&self) -> &str {
        self.query.text()
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    /// Whether the search text holds at least one token.
    pub fn is_searching(&self) -> bool {
        !self.query.is_empty()
    }

    /// Recompute filter output for every group from its current property tree.
    /// Returns how many trees were filtered.
    ///
    /// Results last one tick. Value edits can reshape a tree without a
    /// structural change, so nothing is reused across ticks. Groups with a
    /// notice, or whose tree cannot be read, get an empty result.
    pub fn refresh_filters<H: InspectorHost<Types = T>>(&mut self, host: &H) -> usize {
        if !self.is_searching() {
            for view in self.cache.views_mut() {
                view.state.filtered = None;
            }
            return 0;
        }

        let query = &self.query;
        let mut filtered = 0;
        for view in self.cache.views_mut() {
            let tree = match view.group.members().first() {
                Some(primary) if view.notice().is_none() => Some(host.property_tree_of(*primary)),
                _ => None,
            };
            let result = match tree {
                Some(Ok(tree)) => {
                    filtered += 1;
                    filter_tree(&tree, query)
                }
                Some(Err(err)) => {
                    debug!("No property tree for {:?}: {err}", view.group.component_type());
                    FilterResult::default()
                }
                None => FilterResult::default(),
            };
            view.state.filtered = Some(CachedFilter {
                query: query.text().to_string(),
                result,
            });
        }
        filtered
    }

    /// Filtered properties of `key` from the last tick.
    ///
    /// `None` while the search text is empty, and for a search text set
    /// after the last tick.
    pub fn filtered_view(&self, key: &GroupKey<T>) -> Option<&FilterResult> {
        if !self.is_searching() {
            return None;
        }
        self.cache.get(key)?.state.filtered_for(self.query.text())
    }

    /// Returns `false` if the group no longer exists.
    pub fn set_expanded(&mut self, key: &GroupKey<T>, expanded: bool) -> bool {
        match self.cache.get_mut(key) {
            Some(view) => {
                view.state.expanded = expanded;
                true
            }
            None => false,
        }
    }

    /// Flip the fold state; returns the new state, or `None` if the group no longer exists.
    pub fn toggle_expanded(&mut self, key: &GroupKey<T>) -> Option<bool> {
        let view = self.cache.get_mut(key)?;
        view.state.expanded = !view.state.expanded;
        Some(view.state.expanded)
    }

    /// Drop all groups and forget the watcher snapshot.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.watcher.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock::{MockHost, MockTypes};
    use crate::property::PropertyNode;

    fn make_host() -> MockHost {
        let mut host = MockHost::new();
        host.trees.insert(
            "Material",
            PropertyNode::root(
                "Material",
                vec![
                    PropertyNode::composite(
                        "Color",
                        vec![
                            PropertyNode::leaf("r"),
                            PropertyNode::leaf("g"),
                            PropertyNode::leaf("b"),
                        ],
                    ),
                    PropertyNode::leaf("Shader"),
                ],
            ),
        );
        host.trees.insert(
            "Script",
            PropertyNode::root(
                "Script",
                vec![PropertyNode::leaf("Main Color"), PropertyNode::leaf("Speed")],
            ),
        );
        for entity in 1..=3 {
            host.spawn(entity, &["Transform", "Material", "Script"]);
        }
        host.select(&[1, 2, 3]);
        host
    }

    fn key_of(session: &InspectorSession<MockTypes>, index: usize) -> GroupKey<MockTypes> {
        session.current_groups()[index].key()
    }

    #[test]
    fn tick_rebuilds_only_on_structural_change() {
        let mut host = make_host();
        let mut session = InspectorSession::default();

        assert!(session.tick(&host).rebuilt);
        assert!(!session.tick(&host).rebuilt);

        host.add(3, "Collider");
        let report = session.tick(&host);
        assert!(report.rebuilt);
        assert_eq!(report.reconciled.kept, 3);
    }

    #[test]
    fn every_group_spans_the_whole_selection() {
        let mut host = make_host();
        host.add(1, "Script");
        let mut session = InspectorSession::default();
        session.tick(&host);

        assert_eq!(session.current_groups().len(), 3);
        assert!(session.current_groups().iter().all(|v| v.group.len() == 3));
    }

    #[test]
    fn fold_state_survives_rebuilds() {
        let mut host = make_host();
        let mut session = InspectorSession::default();
        session.tick(&host);

        let script = key_of(&session, 2);
        assert_eq!(session.toggle_expanded(&script), Some(false));

        host.add(2, "Collider");
        session.tick(&host);
        session.rebuild(&host);
        assert!(!session.group(&script).unwrap().state.expanded);
    }

    #[test]
    fn filtered_view_requires_search_text() {
        let host = make_host();
        let mut session = InspectorSession::default();
        session.tick(&host);
        let material = key_of(&session, 1);

        assert!(session.filtered_view(&material).is_none());

        session.set_search_text("color");
        session.tick(&host);
        let result = session.filtered_view(&material).unwrap();
        assert_eq!(result.len(), 1);
        assert!(result.entries()[0].show_subtree_unfiltered);
        assert_eq!(result.entries()[0].node.name(), "Color");

        session.set_search_text("");
        assert!(session.filtered_view(&material).is_none());
    }

    #[test]
    fn search_tokens_match_inside_names() {
        let host = make_host();
        let mut session = InspectorSession::default();
        session.set_search_text("colo r");
        session.tick(&host);

        let script = key_of(&session, 2);
        let result = session.filtered_view(&script).unwrap();
        let names: Vec<_> = result.iter().map(|e| e.node.name()).collect();
        assert_eq!(names, vec!["Main Color"]);
    }

    #[test]
    fn empty_match_is_an_empty_result() {
        let host = make_host();
        let mut session = InspectorSession::default();
        session.set_search_text("velocity");
        session.tick(&host);

        let transform = key_of(&session, 0);
        assert!(session.filtered_view(&transform).unwrap().is_empty());
    }

    #[test]
    fn collapsed_groups_are_filtered_too() {
        let host = make_host();
        let mut session = InspectorSession::default();
        session.tick(&host);
        let material = key_of(&session, 1);
        session.set_expanded(&material, false);

        session.set_search_text("shader");
        assert_eq!(session.tick(&host).filtered, 3);
        assert_eq!(session.filtered_view(&material).unwrap().len(), 1);
    }

    #[test]
    fn filters_follow_tree_edits_under_a_fixed_query() {
        let mut host = make_host();
        host.trees.insert(
            "Script",
            PropertyNode::root(
                "Script",
                vec![PropertyNode::composite("Waypoints", vec![PropertyNode::leaf("Element 0")])],
            ),
        );
        let mut session = InspectorSession::default();
        session.set_search_text("element");
        session.tick(&host);
        let script = key_of(&session, 2);
        assert_eq!(session.filtered_view(&script).unwrap().len(), 2);

        host.trees.insert(
            "Script",
            PropertyNode::root(
                "Script",
                vec![PropertyNode::composite(
                    "Waypoints",
                    vec![PropertyNode::leaf("Element 0"), PropertyNode::leaf("Element 1")],
                )],
            ),
        );
        let report = session.tick(&host);
        assert!(!report.rebuilt);

        let names: Vec<_> = session
            .filtered_view(&script)
            .unwrap()
            .iter()
            .map(|e| e.node.name())
            .collect();
        assert_eq!(names, vec!["Waypoints", "Element 0", "Element 1"]);
    }

    #[test]
    fn changed_search_text_refilters() {
        let host = make_host();
        let mut session = InspectorSession::default();
        session.set_search_text("speed");
        session.tick(&host);
        let script = key_of(&session, 2);
        assert_eq!(session.filtered_view(&script).unwrap().len(), 1);

        session.set_search_text("main");
        assert!(session.filtered_view(&script).is_none());
        assert_eq!(session.tick(&host).filtered, 3);
        let names: Vec<_> = session
            .filtered_view(&script)
            .unwrap()
            .iter()
            .map(|e| e.node.name())
            .collect();
        assert_eq!(names, vec!["Main Color"]);
    }

    #[test]
    fn unreflected_group_gets_an_empty_result() {
        let mut host = make_host();
        host.unreflected.insert("Material");
        let mut session = InspectorSession::default();
        session.set_search_text("color");
        session.tick(&host);
        session.tick(&host);

        let material = key_of(&session, 1);
        assert!(session.filtered_view(&material).unwrap().is_empty());
        assert!(matches!(
            session.group(&material).unwrap().notice(),
            Some(InspectorError::NotReflected { .. })
        ));
        // Two ticks over Transform and Script only
        assert_eq!(host.tree_requests.get(), 4);
        assert_eq!(session.filtered_view(&key_of(&session, 2)).unwrap().len(), 1);
    }

    #[test]
    fn primary_swap_keeps_fold_state() {
        let mut host = make_host();
        let mut session = InspectorSession::default();
        session.tick(&host);
        let script = key_of(&session, 2);
        session.set_expanded(&script, false);

        host.select(&[2, 1, 3]);
        let report = session.tick(&host);
        assert!(report.rebuilt);
        assert_eq!(report.reconciled.kept, 3);
        assert_eq!(report.reconciled.created, 0);

        let view = session.group(&script).unwrap();
        assert!(!view.state.expanded);
        assert_eq!(view.group.members()[0], host.components_of(2)[2]);
    }

    #[test]
    fn unsupported_group_does_not_block_others() {
        let mut host = make_host();
        host.single_edit_only.insert("Material");
        let mut session = InspectorSession::default();
        session.set_search_text("r");
        session.tick(&host);

        let notices: Vec<_> = session.notices().collect();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].0, key_of(&session, 1));
        assert!(session.filtered_view(&key_of(&session, 2)).is_some());
    }

    #[test]
    fn explicit_request_rebuilds_without_polling() {
        let mut host = make_host();
        let mut session = InspectorSession::new(SessionOptions {
            default_expanded: false,
            poll_every_tick: false,
        });
        assert!(!session.tick(&host).rebuilt);
        assert!(session.current_groups().is_empty());

        session.request_rebuild();
        assert!(session.tick(&host).rebuilt);
        assert!(session.current_groups().iter().all(|v| !v.state.expanded));

        host.add(1, "Collider");
        assert!(!session.tick(&host).rebuilt);
    }

    #[test]
    fn toggling_a_vanished_group_is_ignored() {
        let mut host = make_host();
        let mut session = InspectorSession::default();
        session.tick(&host);
        let script = key_of(&session, 2);

        host.select(&[1, 2]);
        session.tick(&host);
        assert_eq!(session.toggle_expanded(&script), None);
        assert!(!session.set_expanded(&script, true));
    }
}
