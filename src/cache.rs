//! Per-group view state that survives rebuilds.

use std::collections::HashMap;

use bevy::log::warn;

use crate::error::InspectorError;
use crate::filter::FilterResult;
use crate::grouping::{ComponentGroup, GroupKey};
use crate::host::{HostTypes, InspectorHost};

/// Cached filter output together with the query text it was computed for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedFilter {
    pub query: String,
    pub result: FilterResult,
}

/// Interaction state of one group's foldout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub expanded: bool,
    pub filtered: Option<CachedFilter>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            expanded: true,
            filtered: None,
        }
    }
}

impl ViewState {
    pub fn with_expanded(expanded: bool) -> Self {
        Self {
            expanded,
            ..Default::default()
        }
    }

    /// Filter output if it was computed for exactly `query`.
    pub fn filtered_for(&self, query: &str) -> Option<&FilterResult> {
        self.filtered
            .as_ref()
            .filter(|cached| cached.query == query)
            .map(|cached| &cached.result)
    }
}

/// One rendered unit: the group, its combined editor and its view state.
pub struct GroupView<T: HostTypes> {
    pub group: ComponentGroup<T>,
    pub editor: Result<T::Editor, InspectorError>,
    pub state: ViewState,
}

impl<T: HostTypes> GroupView<T> {
    pub fn key(&self) -> GroupKey<T> {
        self.group.key()
    }

    /// Advisory to show in place of the editor, if the group cannot be multi-edited.
    pub fn notice(&self) -> Option<&InspectorError> {
        self.editor.as_ref().err().filter(|err| err.is_notice())
    }

    /// Whether every member still exists in `host`.
    pub fn is_live<H: InspectorHost<Types = T>>(&self, host: &H) -> bool {
        self.group
            .members()
            .iter()
            .all(|member| host.component_type(*member).is_some())
    }
}

/// Ordered group views keyed by group identity.
///
/// A rebuild constructs a complete new set of views and swaps it in; views are
/// never patched in place while the old set may still be read.
pub struct EditorCache<T: HostTypes> {
    views: Vec<GroupView<T>>,
    index: HashMap<GroupKey<T>, usize>,
}

impl<T: HostTypes> Default for EditorCache<T> {
    fn default() -> Self {
        Self {
            views: Vec::new(),
            index: HashMap::new(),
        }
    }
}

/// Outcome counts of one reconciliation, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reconciled {
    pub kept: usize,
    pub created: usize,
    pub dropped: usize,
}

impl<T: HostTypes> EditorCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached views with `groups`.
    ///
    /// Groups whose identity was already cached keep their editor and view
    /// state. New identities get an editor from `host` and a fresh state
    /// from `default_state`. Identities not in `groups` are dropped.
    pub fn reconcile<H: InspectorHost<Types = T>>(
        &mut self,
        host: &H,
        groups: Vec<ComponentGroup<T>>,
        default_state: impl Fn() -> ViewState,
    ) -> Reconciled {
        let mut previous: HashMap<GroupKey<T>, GroupView<T>> = std::mem::take(&mut self.views)
            .into_iter()
            .map(|view| (view.key(), view))
            .collect();

        let mut views = Vec::with_capacity(groups.len());
        let mut index = HashMap::with_capacity(groups.len());
        let mut counts = Reconciled::default();

        for group in groups {
            let key = group.key();
            if index.contains_key(&key) {
                continue;
            }

            let view = match previous.remove(&key) {
                Some(view) => {
                    counts.kept += 1;
                    GroupView { group, ..view }
                }
                None => {
                    counts.created += 1;
                    let editor = host.create_combined_editor(group.members());
                    if let Err(err) = &editor {
                        warn!("{}: {err}", host.type_name(group.component_type()));
                    }
                    GroupView {
                        editor,
                        group,
                        state: default_state(),
                    }
                }
            };

            index.insert(key, views.len());
            views.push(view);
        }

        counts.dropped = previous.len();
        self.views = views;
        self.index = index;
        counts
    }

    pub fn views(&self) -> &[GroupView<T>] {
        &self.views
    }

    pub fn views_mut(&mut self) -> &mut [GroupView<T>] {
        &mut self.views
    }

    pub fn get(&self, key: &GroupKey<T>) -> Option<&GroupView<T>> {
        self.index.get(key).map(|i| &self.views[*i])
    }

    pub fn get_mut(&mut self, key: &GroupKey<T>) -> Option<&mut GroupView<T>> {
        self.index.get(key).map(|i| &mut self.views[*i])
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn clear(&mut self) {
        self.views.clear();
        self.index.clear();
    }
}
