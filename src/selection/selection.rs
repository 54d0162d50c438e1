use bevy::prelude::*;

/// Marker component for selected entities
#[derive(Component, Default, Reflect)]
#[reflect(Component, Default)]
pub struct Selected;

/// Selected entities in the order they were selected. The first one is the
/// primary entity that drives component order in the inspector.
#[derive(Resource, Default, Debug, Clone, PartialEq, Eq)]
pub struct SelectionOrder {
    entities: Vec<Entity>,
}

impl SelectionOrder {
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn primary(&self) -> Option<Entity> {
        self.entities.first().copied()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// Append `entity` unless it is already selected
    pub fn push(&mut self, entity: Entity) {
        if !self.contains(entity) {
            self.entities.push(entity);
        }
    }

    pub fn remove(&mut self, entity: Entity) {
        self.entities.retain(|e| *e != entity);
    }

    /// Move `entity` to the front, selecting it if needed
    pub fn set_primary(&mut self, entity: Entity) {
        self.remove(entity);
        self.entities.insert(0, entity);
    }

    pub fn clear(&mut self) {
        self.entities.clear();
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Keep `SelectionOrder` in step with the `Selected` markers.
///
/// Entities selected within the same frame are appended in entity order.
pub(crate) fn sync_selection_order(
    added: Query<Entity, Added<Selected>>,
    selected: Query<(), With<Selected>>,
    mut removed: RemovedComponents<Selected>,
    mut order: ResMut<SelectionOrder>,
) {
    for entity in removed.read() {
        // Removed and re-added within the same frame still counts as selected
        if selected.get(entity).is_err() {
            order.remove(entity);
        }
    }

    // Query order follows table layout, not the order markers were inserted
    let mut newly_selected: Vec<Entity> = added.iter().collect();
    newly_selected.sort();
    for entity in newly_selected {
        order.push(entity);
    }

    // Entities deselected by despawning never report a removal we can match
    if order.entities.iter().any(|e| selected.get(*e).is_err()) {
        order.entities.retain(|e| selected.get(*e).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::SelectionPlugin;

    fn make_app() -> App {
        let mut app = App::new();
        app.add_plugins(SelectionPlugin);
        app
    }

    #[test]
    fn order_follows_selection_sequence() {
        let mut app = make_app();
        let a = app.world_mut().spawn(Selected).id();
        app.update();
        let b = app.world_mut().spawn(Selected).id();
        app.update();

        assert_eq!(app.world().resource::<SelectionOrder>().entities(), &[a, b]);
    }

    #[test]
    fn same_frame_selection_is_ordered_by_entity() {
        let mut app = make_app();
        let a = app.world_mut().spawn((Selected, Name::new("a"))).id();
        let b = app.world_mut().spawn(Selected).id();
        let c = app.world_mut().spawn((Selected, Transform::default())).id();
        app.update();

        let order = app.world().resource::<SelectionOrder>();
        assert_eq!(order.entities(), &[a, b, c]);
        assert_eq!(order.primary(), Some(a));
    }

    #[test]
    fn deselect_and_despawn_are_dropped() {
        let mut app = make_app();
        let a = app.world_mut().spawn(Selected).id();
        let b = app.world_mut().spawn(Selected).id();
        let c = app.world_mut().spawn(Selected).id();
        app.update();

        app.world_mut().entity_mut(a).remove::<Selected>();
        app.world_mut().despawn(c);
        app.update();

        assert_eq!(app.world().resource::<SelectionOrder>().entities(), &[b]);
    }

    #[test]
    fn set_primary_moves_to_front() {
        let mut order = SelectionOrder::default();
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();
        order.push(a);
        order.push(b);
        order.push(a);
        order.set_primary(b);
        assert_eq!(order.entities(), &[b, a]);
        assert_eq!(order.primary(), Some(b));
    }
}
