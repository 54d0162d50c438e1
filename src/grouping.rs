//! Matching components across the selection into multi-edit groups.
//!
//! The n-th component of a given exact type on the primary entity pairs with
//! the n-th component of that type on every other selected entity. A group is
//! only emitted when every selected entity contributed a member.

use std::hash::{DefaultHasher, Hash, Hasher};

use bevy::log::debug;

use crate::host::{Component, ComponentType, Entity, HostTypes, InspectorHost, SelectionSet};

/// Same-type, same-slot components, one per selected entity, in selection order.
pub struct ComponentGroup<T: HostTypes> {
    component_type: T::ComponentType,
    slot: usize,
    members: Vec<T::Component>,
}

impl<T: HostTypes> ComponentGroup<T> {
    pub fn component_type(&self) -> T::ComponentType {
        self.component_type
    }

    /// Rank among same-type components on each member's entity.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Members in selection order; the first belongs to the primary entity.
    pub fn members(&self) -> &[T::Component] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Identity used to carry view state across rebuilds.
    pub fn key(&self) -> GroupKey<T> {
        GroupKey(self.members.clone())
    }
}

impl<T: HostTypes> Clone for ComponentGroup<T> {
    fn clone(&self) -> Self {
        Self {
            component_type: self.component_type,
            slot: self.slot,
            members: self.members.clone(),
        }
    }
}

impl<T: HostTypes> std::fmt::Debug for ComponentGroup<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentGroup")
            .field("component_type", &self.component_type)
            .field("slot", &self.slot)
            .field("members", &self.members)
            .finish()
    }
}

/// Member set of a group.
///
/// Equality and hashing ignore member order, so a group keeps its identity when
/// the selection is reordered or the primary entity changes.
pub struct GroupKey<T: HostTypes>(pub Vec<T::Component>);

impl<T: HostTypes> GroupKey<T> {
    /// Members in the order the key was taken.
    pub fn members(&self) -> &[T::Component] {
        &self.0
    }
}

impl<T: HostTypes> Clone for GroupKey<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

// Members come from distinct entities, so containment both ways is set equality
impl<T: HostTypes> PartialEq for GroupKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().all(|member| other.0.contains(member))
    }
}

impl<T: HostTypes> Eq for GroupKey<T> {}

impl<T: HostTypes> Hash for GroupKey<T> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        let combined = self.0.iter().fold(0u64, |acc, member| {
            let mut hasher = DefaultHasher::new();
            member.hash(&mut hasher);
            acc.wrapping_add(hasher.finish())
        });
        state.write_usize(self.0.len());
        state.write_u64(combined);
    }
}

impl<T: HostTypes> std::fmt::Debug for GroupKey<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("GroupKey").field(&self.0).finish()
    }
}

/// Components that still exist, paired with their exact type.
fn live_components<H: InspectorHost>(
    host: &H,
    components: Vec<Component<H>>,
) -> Vec<(Component<H>, ComponentType<H>)> {
    components
        .into_iter()
        .filter_map(|component| Some((component, host.component_type(component)?)))
        .collect()
}

/// The `slot`-th component of type `ty` in `components`, if there is one.
fn nth_of_type<H: InspectorHost>(
    components: &[(Component<H>, ComponentType<H>)],
    ty: ComponentType<H>,
    slot: usize,
) -> Option<Component<H>> {
    components
        .iter()
        .filter(|(_, t)| *t == ty)
        .nth(slot)
        .map(|(component, _)| *component)
}

/// Compute the complete multi-edit groups for `selection`.
///
/// Groups come out in the primary entity's component order. Components that
/// no longer exist are skipped as if absent.
pub fn group_components<H: InspectorHost>(
    host: &H,
    selection: &SelectionSet<Entity<H>>,
) -> Vec<ComponentGroup<H::Types>> {
    let Some(primary) = selection.primary() else {
        return Vec::new();
    };

    let primary_components = live_components(host, host.components_of(primary));
    let others: Vec<_> = selection
        .others()
        .iter()
        .map(|entity| live_components(host, host.components_of(*entity)))
        .collect();

    let mut groups = Vec::with_capacity(primary_components.len());
    let mut incomplete = 0usize;

    for (index, (component, ty)) in primary_components.iter().enumerate() {
        let slot = primary_components[..index]
            .iter()
            .filter(|(_, t)| t == ty)
            .count();

        let mut members = Vec::with_capacity(selection.len());
        members.push(*component);
        members.extend(
            others
                .iter()
                .filter_map(|components| nth_of_type::<H>(components, *ty, slot)),
        );

        if members.len() == selection.len() {
            groups.push(ComponentGroup {
                component_type: *ty,
                slot,
                members,
            });
        } else {
            incomplete += 1;
        }
    }

    debug!(
        "Grouped {} components across {} entities ({} incomplete dropped)",
        groups.len(),
        selection.len(),
        incomplete
    );

    groups
}
