//! [`InspectorHost`] over a Bevy [`World`], using reflection for property trees.
//!
//! Bevy allows one component of each type per entity, so every group this
//! host produces sits at slot 0.

use bevy::ecs::component::ComponentId;
use bevy::prelude::*;
use bevy::reflect::{PartialReflect, ReflectRef, TypeRegistry};
use std::any::TypeId;

use crate::error::InspectorError;
use crate::host::{HostTypes, InspectorHost};
use crate::property::PropertyNode;
use super::settings::InspectorSettings;

/// One component instance: the entity it lives on and its component id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentRef {
    pub entity: Entity,
    pub id: ComponentId,
}

/// Identity types used by [`WorldHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BevyTypes;

impl HostTypes for BevyTypes {
    type Entity = Entity;
    type Component = ComponentRef;
    type ComponentType = ComponentId;
    type Editor = ComponentEditor;
}

/// Edit session over the same component type on several entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentEditor {
    pub component_id: ComponentId,
    pub type_id: TypeId,
    pub type_name: String,
    pub targets: Vec<Entity>,
    /// Immutable components can be shown but not written.
    pub read_only: bool,
}

impl ComponentEditor {
    /// Write `value` onto every target. Targets despawned since the editor was
    /// created are skipped. Returns how many targets were written.
    pub fn apply(&self, world: &mut World, value: &dyn PartialReflect) -> Result<usize, InspectorError> {
        if self.read_only {
            return Err(InspectorError::ReadOnly {
                type_name: self.type_name.clone(),
            });
        }

        let type_registry = world.resource::<AppTypeRegistry>().clone();
        let type_registry = type_registry.read();
        let Some(reflect_component) = type_registry
            .get(self.type_id)
            .and_then(|r| r.data::<ReflectComponent>())
        else {
            return Err(InspectorError::NotReflected {
                type_name: self.type_name.clone(),
            });
        };

        let mut written = 0;
        for entity in &self.targets {
            let Ok(entity_mut) = world.get_entity_mut(*entity) else {
                debug!("Skipping despawned target {:?} for {}", entity, self.type_name);
                continue;
            };
            if !entity_mut.contains_id(self.component_id) {
                continue;
            }
            reflect_component.apply(entity_mut, value);
            written += 1;
        }
        Ok(written)
    }
}

/// Read-only view of a world for one inspector tick.
pub struct WorldHost<'w> {
    world: &'w World,
    registry: &'w TypeRegistry,
    settings: &'w InspectorSettings,
}

impl<'w> WorldHost<'w> {
    pub fn new(world: &'w World, registry: &'w TypeRegistry, settings: &'w InspectorSettings) -> Self {
        Self {
            world,
            registry,
            settings,
        }
    }

    fn type_id_of(&self, id: ComponentId) -> Option<TypeId> {
        self.world.components().get_info(id)?.type_id()
    }

    /// Full type path, preferring the reflected path over the component's debug name.
    fn type_path(&self, id: ComponentId) -> String {
        if let Some(registration) = self.type_id_of(id).and_then(|t| self.registry.get(t)) {
            return registration.type_info().type_path().to_string();
        }
        self.world
            .components()
            .get_info(id)
            .map(|info| info.name().to_string())
            .unwrap_or_else(|| format!("{:?}", id))
    }

    fn property_node(&self, name: &str, value: &dyn PartialReflect, depth: usize) -> PropertyNode {
        let children = self.children_of(value, depth + 1);
        let mut node = if children.is_empty() {
            PropertyNode::leaf(display_name(name))
        } else {
            PropertyNode::composite(display_name(name), children)
        };

        let custom = value
            .get_represented_type_info()
            .is_some_and(|info| self.settings.is_custom_drawer(info.type_path()));
        if custom {
            node = node.with_custom_drawer();
        }
        node
    }

    fn children_of(&self, value: &dyn PartialReflect, depth: usize) -> Vec<PropertyNode> {
        if depth > self.settings.max_depth {
            return Vec::new();
        }
        let max_items = self.settings.max_collection_items;

        match value.reflect_ref() {
            ReflectRef::Struct(s) => (0..s.field_len())
                .filter_map(|i| Some(self.property_node(s.name_at(i)?, s.field_at(i)?, depth)))
                .collect(),
            ReflectRef::TupleStruct(ts) => (0..ts.field_len())
                .filter_map(|i| Some(self.property_node(&i.to_string(), ts.field(i)?, depth)))
                .collect(),
            ReflectRef::Tuple(t) => (0..t.field_len())
                .filter_map(|i| Some(self.property_node(&i.to_string(), t.field(i)?, depth)))
                .collect(),
            ReflectRef::List(list) => (0..list.len().min(max_items))
                .filter_map(|i| Some(self.property_node(&format!("Element {i}"), list.get(i)?, depth)))
                .collect(),
            ReflectRef::Array(arr) => (0..arr.len().min(max_items))
                .filter_map(|i| Some(self.property_node(&format!("Element {i}"), arr.get(i)?, depth)))
                .collect(),
            ReflectRef::Map(map) => map
                .iter()
                .take(max_items)
                .map(|(key, value)| self.property_node(&format!("{key:?}"), value, depth))
                .collect(),
            ReflectRef::Set(set) => set
                .iter()
                .take(max_items)
                .enumerate()
                .map(|(i, value)| self.property_node(&format!("Element {i}"), value, depth))
                .collect(),
            ReflectRef::Enum(e) => (0..e.field_len())
                .filter_map(|i| {
                    let name = e.name_at(i).map(str::to_string).unwrap_or_else(|| i.to_string());
                    Some(self.property_node(&name, e.field_at(i)?, depth))
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl InspectorHost for WorldHost<'_> {
    type Types = BevyTypes;

    fn current_selection(&self) -> Vec<Entity> {
        let Some(order) = self.world.get_resource::<crate::selection::SelectionOrder>() else {
            return Vec::new();
        };
        order
            .entities()
            .iter()
            .copied()
            .filter(|entity| self.world.get_entity(*entity).is_ok())
            .collect()
    }

    fn components_of(&self, entity: Entity) -> Vec<ComponentRef> {
        let Ok(entity_ref) = self.world.get_entity(entity) else {
            return Vec::new();
        };
        entity_ref
            .archetype()
            .components()
            .iter()
            .filter(|id| !self.settings.is_hidden_component(&self.type_path(**id)))
            .map(|id| ComponentRef { entity, id: *id })
            .collect()
    }

    fn component_type(&self, component: ComponentRef) -> Option<ComponentId> {
        let entity_ref = self.world.get_entity(component.entity).ok()?;
        entity_ref
            .contains_id(component.id)
            .then_some(component.id)
    }

    fn type_name(&self, component_type: ComponentId) -> String {
        if let Some(registration) = self.type_id_of(component_type).and_then(|t| self.registry.get(t)) {
            return registration.type_info().type_path_table().short_path().to_string();
        }
        let path = self.type_path(component_type);
        path.rsplit("::").next().unwrap_or(&path).to_string()
    }

    fn property_tree_of(&self, component: ComponentRef) -> Result<PropertyNode, InspectorError> {
        let Ok(entity_ref) = self.world.get_entity(component.entity) else {
            return Err(InspectorError::stale(format!("{:?}", component.entity)));
        };

        let registration = self
            .type_id_of(component.id)
            .and_then(|type_id| self.registry.get(type_id));
        let Some(reflect_component) = registration.and_then(|r| r.data::<ReflectComponent>()) else {
            return Err(InspectorError::NotReflected {
                type_name: self.type_name(component.id),
            });
        };

        let Some(reflected) = reflect_component.reflect(entity_ref) else {
            return Err(InspectorError::stale(format!(
                "{} on {:?}",
                self.type_name(component.id),
                component.entity
            )));
        };

        Ok(PropertyNode::root(
            self.type_name(component.id),
            self.children_of(reflected.as_partial_reflect(), 1),
        ))
    }

    fn create_combined_editor(&self, components: &[ComponentRef]) -> Result<ComponentEditor, InspectorError> {
        let Some(first) = components.first() else {
            return Err(InspectorError::stale("empty component group"));
        };
        let type_name = self.type_name(first.id);

        let Some(info) = self.world.components().get_info(first.id) else {
            return Err(InspectorError::stale(type_name));
        };
        let reflected = info
            .type_id()
            .filter(|type_id| {
                self.registry
                    .get(*type_id)
                    .is_some_and(|r| r.data::<ReflectComponent>().is_some())
            });
        let Some(type_id) = reflected else {
            return Err(InspectorError::NotReflected { type_name });
        };

        let read_only = !info.mutable();
        if read_only && components.len() > 1 {
            return Err(InspectorError::UnsupportedMultiEdit {
                type_name,
                targets: components.len(),
            });
        }

        Ok(ComponentEditor {
            component_id: first.id,
            type_id,
            type_name,
            targets: components.iter().map(|c| c.entity).collect(),
            read_only,
        })
    }
}

/// Turn a field name into the label shown in the inspector: `main_color` becomes `Main Color`.
pub fn display_name(field: &str) -> String {
    field
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
