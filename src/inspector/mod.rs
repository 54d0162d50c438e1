//! Bevy wiring: settings, the world-backed host and the refresh systems.

mod settings;
mod state;
mod world_host;

pub use settings::*;
pub use state::*;
pub use world_host::*;

use bevy::prelude::*;

use crate::selection::SelectionPlugin;
use crate::session::InspectorSession;

/// Adds selection tracking and a searchable component inspector.
///
/// Render drivers read [`InspectorState`] after [`InspectorSystems::Refresh`].
#[derive(Default)]
pub struct SearchableInspectorPlugin {
    /// Settings to use instead of the config file
    pub settings: Option<InspectorSettings>,
}

impl SearchableInspectorPlugin {
    pub fn with_settings(settings: InspectorSettings) -> Self {
        Self {
            settings: Some(settings),
        }
    }
}

impl Plugin for SearchableInspectorPlugin {
    fn build(&self, app: &mut App) {
        let settings = self.settings.clone().unwrap_or_else(InspectorSettings::load);
        let session = InspectorSession::new(settings.session_options());

        if !app.is_plugin_added::<SelectionPlugin>() {
            app.add_plugins(SelectionPlugin);
        }

        app.insert_resource(settings)
            .insert_resource(InspectorState { session })
            .add_message::<RequestInspectorRebuild>()
            .configure_sets(
                Update,
                (InspectorSystems::Requests, InspectorSystems::Refresh).chain(),
            )
            .add_systems(
                Update,
                handle_rebuild_requests.in_set(InspectorSystems::Requests),
            )
            .add_systems(Update, refresh_inspector.in_set(InspectorSystems::Refresh));
    }
}
