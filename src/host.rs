//! The interface the inspector core consumes from its host object graph.
//!
//! The core never mutates the host. Everything it knows about entities,
//! components and property trees is read through [`InspectorHost`] each tick.

use std::fmt::Debug;
use std::hash::Hash;

use crate::error::InspectorError;
use crate::property::PropertyNode;

/// Identity types a host hands to the core.
///
/// Kept separate from [`InspectorHost`] so that state owned by the core (the
/// session, its caches) can outlive any borrowed host view, such as a host that
/// wraps `&World` for the duration of one system run.
pub trait HostTypes: 'static {
    /// A selectable node of the object graph.
    type Entity: Copy + Eq + Hash + Debug + Send + Sync;
    /// Reference identity of one component instance.
    type Component: Copy + Eq + Hash + Debug + Send + Sync;
    /// Exact runtime type of a component.
    type ComponentType: Copy + Eq + Hash + Debug + Send + Sync;
    /// Opaque multi-target edit session.
    type Editor: Send + Sync;
}

/// Read access to the host object graph.
pub trait InspectorHost {
    type Types: HostTypes;

    /// Current selection, primary entity first.
    fn current_selection(&self) -> Vec<Entity<Self>>;

    /// Components of `entity` in host order. Destroyed entities yield an empty list.
    fn components_of(&self, entity: Entity<Self>) -> Vec<Component<Self>>;

    /// Exact runtime type of `component`, or `None` if it no longer exists.
    fn component_type(&self, component: Component<Self>) -> Option<ComponentType<Self>>;

    /// Human-readable name of a component type, for notices and logs.
    fn type_name(&self, component_type: ComponentType<Self>) -> String;

    /// Property tree of one component. The root node stands for the component itself.
    fn property_tree_of(&self, component: Component<Self>) -> Result<PropertyNode, InspectorError>;

    /// Combine `components` (all the same type) into one edit session.
    fn create_combined_editor(
        &self,
        components: &[Component<Self>],
    ) -> Result<Editor<Self>, InspectorError>;
}

pub type Entity<H> = <<H as InspectorHost>::Types as HostTypes>::Entity;
pub type Component<H> = <<H as InspectorHost>::Types as HostTypes>::Component;
pub type ComponentType<H> = <<H as InspectorHost>::Types as HostTypes>::ComponentType;
pub type Editor<H> = <<H as InspectorHost>::Types as HostTypes>::Editor;

/// Ordered, duplicate-free selection. The first entity is the primary one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSet<E> {
    entities: Vec<E>,
}

impl<E: Copy + Eq> SelectionSet<E> {
    /// Build a selection, keeping the first occurrence of repeated entities.
    pub fn new(entities: impl IntoIterator<Item = E>) -> Self {
        let mut unique: Vec<E> = Vec::new();
        for entity in entities {
            if !unique.contains(&entity) {
                unique.push(entity);
            }
        }
        Self { entities: unique }
    }

    pub fn primary(&self) -> Option<E> {
        self.entities.first().copied()
    }

    /// Every entity except the primary, in selection order.
    pub fn others(&self) -> &[E] {
        self.entities.get(1..).unwrap_or(&[])
    }

    pub fn entities(&self) -> &[E] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
