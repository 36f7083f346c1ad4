mod catalog_panel;
mod central_panel;
mod export_modal;
mod settings_panel;
mod toasts;

pub use catalog_panel::catalog_panel;
pub use central_panel::central_panel;
pub use export_modal::{ExportTab, export_modal};
pub use settings_panel::settings_panel;
pub use toasts::toasts;
