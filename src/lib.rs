#![warn(clippy::all, rust_2018_idioms)]

pub mod animation;
pub mod app;
pub mod cli;
pub mod clipboard;
pub mod command;
pub mod components;
pub mod error;
pub mod export;
pub mod host;
pub mod notice;
pub mod panels;
pub mod renderer;
pub mod schema;
pub mod surface;
pub mod theme;
pub mod util;

pub use animation::{AnimationInstance, CATALOG, ModuleDescriptor};
pub use app::GalleryApp;
#[cfg(not(target_arch = "wasm32"))]
pub use cli::Cli;
pub use command::HostCommand;
pub use error::{GalleryError, GalleryResult, LifecycleError};
pub use export::{ExportDocument, export_document};
pub use host::AnimationHost;
pub use renderer::Renderer;
pub use schema::{ParamKind, ParamValue, RawValue, Schema, SchemaError};
pub use surface::{DrawCommand, Surface};
pub use theme::Theme;
