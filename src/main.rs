//! Main binary: runs the inspector headless against a small demo scene and
//! logs what it would draw.
//!
//! Pass search text as the first argument, e.g. `bevy_searchable_inspector color`.

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_searchable_inspector::{
    FilterEntry, InspectorState, SearchableInspectorPlugin, Selected,
};

#[derive(Component, Reflect, Default)]
#[reflect(Component, Default)]
struct Renderer {
    main_color: Color,
    cast_shadows: bool,
}

#[derive(Component, Reflect, Default)]
#[reflect(Component, Default)]
struct Patrol {
    speed: f32,
    waypoints: Vec<Vec3>,
}

#[derive(Component, Reflect, Default)]
#[reflect(Component, Default)]
struct Collider {
    radius: f32,
}

fn main() {
    let search = std::env::args().nth(1).unwrap_or_default();

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()))
        .add_plugins(SearchableInspectorPlugin::default())
        .register_type::<Renderer>()
        .register_type::<Patrol>()
        .register_type::<Collider>()
        .add_systems(Startup, spawn_demo_scene);

    app.update();
    app.world_mut()
        .resource_mut::<InspectorState>()
        .session
        .set_search_text(&search);
    app.update();

    log_inspector(app.world());
}

fn spawn_demo_scene(mut commands: Commands) {
    commands.spawn((
        Name::new("Guard"),
        Selected,
        Transform::from_xyz(0.0, 0.0, 0.0),
        Renderer::default(),
        Patrol {
            speed: 2.0,
            waypoints: vec![Vec3::ZERO, Vec3::X * 4.0],
        },
    ));
    commands.spawn((
        Name::new("Sentry"),
        Selected,
        Transform::from_xyz(3.0, 0.0, 1.0),
        Renderer::default(),
        Collider { radius: 0.5 },
    ));
}

fn log_inspector(world: &World) {
    let session = &world.resource::<InspectorState>().session;
    info!("{} shared component groups", session.current_groups().len());

    for view in session.current_groups() {
        let title = match &view.editor {
            Ok(editor) => editor.type_name.clone(),
            Err(err) => err.to_string(),
        };
        info!("[{}] {} ({} targets)", if view.state.expanded { "-" } else { "+" }, title, view.group.len());

        if let Some(result) = session.filtered_view(&view.key()) {
            if result.is_empty() {
                info!("    no matching properties");
            }
            for entry in result {
                log_entry(entry);
            }
        }
    }
}

fn log_entry(entry: &FilterEntry) {
    let indent = "  ".repeat(entry.node.depth() + 1);
    if entry.show_subtree_unfiltered {
        info!("{indent}{} *", entry.node.name());
    } else {
        info!("{indent}{}", entry.node.name());
    }
}
