use bevy::prelude::*;

use super::settings::InspectorSettings;
use super::world_host::{BevyTypes, WorldHost};
use crate::session::InspectorSession;

/// The inspector session for the current selection, refreshed every frame.
#[derive(Resource, Default)]
pub struct InspectorState {
    pub session: InspectorSession<BevyTypes>,
}

/// Message to force a full regroup on the next refresh, e.g. after a reflected
/// type registration changed.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct RequestInspectorRebuild;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum InspectorSystems {
    /// Collects rebuild requests
    Requests,
    /// Polls the selection and updates groups and filters
    Refresh,
}

pub(super) fn handle_rebuild_requests(
    mut requests: MessageReader<RequestInspectorRebuild>,
    mut state: ResMut<InspectorState>,
) {
    if requests.read().count() > 0 {
        state.session.request_rebuild();
    }
}

/// Run one session tick against the world
pub(super) fn refresh_inspector(world: &mut World) {
    world.resource_scope(|world, mut state: Mut<InspectorState>| {
        let type_registry = world.resource::<AppTypeRegistry>().clone();
        let type_registry = type_registry.read();
        let settings = world.resource::<InspectorSettings>();

        let host = WorldHost::new(world, &type_registry, settings);
        state.session.tick(&host);
    });
}
