use eframe::egui::{self, Color32};
use serde::{Deserialize, Serialize};

/// Storage key of the only value persisted between sessions
pub const THEME_KEY: &str = "theme";

/// Light or dark presentation, shared by the chrome and the active animation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Name used in storage and in exported documents
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Canvas background behind every animation
    pub fn background(self) -> Color32 {
        match self {
            Theme::Light => Color32::from_rgb(0xf8, 0xfa, 0xfc),
            Theme::Dark => Color32::from_rgb(0x0f, 0x17, 0x2a),
        }
    }

    /// CSS form of [`Theme::background`] for exported pages
    pub fn background_css(self) -> &'static str {
        match self {
            Theme::Light => "#f8fafc",
            Theme::Dark => "#0f172a",
        }
    }

    /// Icon shown on the theme toggle button
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "◑",
            Theme::Light => "☀",
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => egui::Visuals::dark(),
        }
    }

    /// Reads the persisted preference, falling back to light.
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        storage
            .and_then(|storage| eframe::get_value::<Theme>(storage, THEME_KEY))
            .unwrap_or_default()
    }

    pub fn store(self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, THEME_KEY, &self);
    }
}
