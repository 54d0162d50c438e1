//! Polling detection of structural changes in the selection.

use crate::host::{Component, Entity, HostTypes, InspectorHost, SelectionSet};

/// Remembers the flattened `(entity, component)` sequence of the last poll.
///
/// Only identities are compared, so edits to component values never count as
/// a change; adding, removing or reordering components and changing the
/// selection all do.
pub struct SelectionWatcher<T: HostTypes> {
    snapshot: Option<Vec<(T::Entity, T::Component)>>,
}

impl<T: HostTypes> Default for SelectionWatcher<T> {
    fn default() -> Self {
        Self { snapshot: None }
    }
}

impl<T: HostTypes> SelectionWatcher<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the structure differs from the previous poll.
    /// The first poll always reports a change.
    pub fn poll<H>(&mut self, host: &H) -> bool
    where
        H: InspectorHost<Types = T>,
    {
        let current = flatten(host);
        let changed = self.snapshot.as_ref() != Some(&current);
        self.snapshot = Some(current);
        changed
    }

    /// Forget the snapshot so the next poll reports a change.
    pub fn reset(&mut self) {
        self.snapshot = None;
    }

    /// Number of components in the last snapshot.
    pub fn tracked(&self) -> usize {
        self.snapshot.as_ref().map_or(0, Vec::len)
    }
}

fn flatten<H: InspectorHost>(host: &H) -> Vec<(Entity<H>, Component<H>)> {
    let selection = SelectionSet::new(host.current_selection());
    selection
        .entities()
        .iter()
        .copied()
        .flat_map(|entity| {
            host.components_of(entity)
                .into_iter()
                .map(move |component| (entity, component))
        })
        .collect()
}
