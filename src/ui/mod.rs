//! User interface rendering layer with component-based architecture.
//!
//! This module turns application state into ANSI-styled output through
//! composable rendering components. It also owns the gallery model the search
//! controller drives.
//!
//! # Architecture
//!
//! ```text
//! SearchController ──► Gallery (GalleryView)
//!                          │
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`gallery`]: The `GalleryView` port and its in-memory card gallery
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Composable UI component renderers
//! - [`helpers`]: Shared rendering utilities (highlighting, formatting)
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod gallery;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use gallery::{Gallery, GalleryView};
pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    CardItem, EmptyState, FooterInfo, GalleryWindow, HeaderInfo, SearchBarInfo, ToastItem,
    UIViewModel,
};
