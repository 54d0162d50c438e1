//! # Bevy Searchable Inspector
//!
//! Multi-selection component inspector core for Bevy apps.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_searchable_inspector::SearchableInspectorPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(SearchableInspectorPlugin::default())
//!         .run();
//! }
//! ```
//!
//! ## Selecting Entities
//!
//! Insert [`Selected`] on the entities to inspect. The first entity selected is
//! the primary one; its component order is the order groups are shown in:
//!
//! ```ignore
//! commands.entity(player).insert(Selected);
//! ```
//!
//! ## Reading the Inspector
//!
//! [`InspectorState`] holds one group per component type shared by every
//! selected entity. Each group carries a combined editor, its fold state and,
//! while search text is set, the filtered property rows to draw.
//!
//! Components need `#[reflect(Component)]` and a type registration to get a
//! property tree and an editor. Others show up with a notice.

pub mod cache;
pub mod error;
pub mod filter;
pub mod grouping;
pub mod host;
pub mod inspector;
pub mod property;
pub mod selection;
pub mod session;
pub mod watcher;

// Re-export the plugin and the state it maintains
pub use inspector::{
    BevyTypes, ComponentEditor, ComponentRef, InspectorSettings, InspectorState, InspectorSystems,
    RequestInspectorRebuild, SearchableInspectorPlugin, WorldHost,
};

// Re-export selection types
pub use selection::{Selected, SelectionOrder, SelectionPlugin};

// Re-export the host-independent core
pub use error::InspectorError;
pub use filter::{FilterEntry, FilterResult, SearchQuery, filter_tree};
pub use host::{HostTypes, InspectorHost, SelectionSet};
pub use property::PropertyNode;
pub use session::{InspectorSession, SessionOptions, TickReport};
