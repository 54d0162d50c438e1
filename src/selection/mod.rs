mod selection;

pub use selection::*;

use bevy::prelude::*;

pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Selected>()
            .init_resource::<SelectionOrder>()
            .add_systems(PreUpdate, sync_selection_order);
    }
}
