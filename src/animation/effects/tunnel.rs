use std::f32::consts::{FRAC_PI_4, TAU};

use eframe::egui::{Color32, Pos2, Stroke, Vec2, pos2, vec2};

use super::faded;
use crate::animation::{Animation, CreateContext};
use crate::schema::{ParamValue, Schema};
use crate::surface::Surface;
use crate::theme::Theme;

/// Depth at which sections spawn
const MAX_Z: f32 = 2000.0;
const FOCAL_LENGTH: f32 = 300.0;
/// World-space half width of a section
const SECTION_RADIUS: f32 = 400.0;

const DARK_NEON: &str = "#818cf8";
const LIGHT_NEON: &str = "#6366f1";

const SHAPES: &[&str] = &[
    "Square", "Circle", "Triangle", "Pentagon", "Hexagon", "Octagon", "Star", "Diamond",
];

/// Outline of one tunnel section in unit coordinates
fn outline(shape: &str) -> Vec<Vec2> {
    let regular = |sides: usize, phase: f32| -> Vec<Vec2> {
        (0..sides)
            .map(|i| Vec2::angled(phase + i as f32 * TAU / sides as f32))
            .collect()
    };
    match shape {
        "Circle" => regular(32, 0.0),
        "Triangle" => regular(3, -TAU / 4.0),
        "Pentagon" => regular(5, -TAU / 4.0),
        "Hexagon" => regular(6, 0.0),
        "Octagon" => regular(8, TAU / 16.0),
        "Star" => (0..10)
            .map(|i| {
                let radius = if i % 2 == 0 { 1.0 } else { 0.45 };
                Vec2::angled(-TAU / 4.0 + i as f32 * TAU / 10.0) * radius
            })
            .collect(),
        "Diamond" => regular(4, -TAU / 4.0)
            .into_iter()
            .map(|p| vec2(p.x * 0.7, p.y))
            .collect(),
        _ => regular(4, FRAC_PI_4),
    }
}

/// Nested outlines flying towards the viewer
#[derive(Debug)]
pub struct Tunnel {
    size: Vec2,
    pointer: Pos2,
    /// Depth of every section, farthest first after each frame
    sections: Vec<f32>,
}

impl Tunnel {
    pub fn schema() -> Schema {
        Schema::new()
            .range("speed", "Speed", 0.1, 2.0, 0.1, 0.5)
            .range("density", "Section Density", 10.0, 100.0, 1.0, 40.0)
            .range("width", "Line Width", 0.5, 5.0, 0.5, 2.0)
            .select("shapes", "Shape", SHAPES, "Square")
            .color("color", "Neon Color", DARK_NEON)
    }

    pub fn new(ctx: &CreateContext, config: &mut Schema) -> Self {
        let mut tunnel = Self {
            size: ctx.size,
            pointer: (ctx.size / 2.0).to_pos2(),
            sections: Vec::new(),
        };
        tunnel.set_theme(ctx.theme, config);
        tunnel.build_sections(config);
        tunnel
    }

    fn build_sections(&mut self, config: &Schema) {
        let count = super::count(config.number_or("density", 40.0)).max(1);
        let gap = MAX_Z / count as f32;
        self.sections = (0..count).map(|i| (i as f32 + 1.0) * gap).collect();
    }

    /// Vanishing point, pulled towards the pointer
    fn center(&self) -> Pos2 {
        let middle = (self.size / 2.0).to_pos2();
        middle + (self.pointer - middle) * 0.2
    }
}

impl Animation for Tunnel {
    fn resize(&mut self, size: Vec2, _config: &Schema) {
        self.size = size;
        self.pointer = (size / 2.0).to_pos2();
    }

    fn pointer_move(&mut self, pos: Pos2) {
        self.pointer = pos;
    }

    fn set_theme(&mut self, theme: Theme, config: &mut Schema) {
        let swapped = match (theme, config.text("color")) {
            (Theme::Dark, Some(LIGHT_NEON)) => DARK_NEON,
            (Theme::Light, Some(DARK_NEON)) => LIGHT_NEON,
            _ => return,
        };
        if let Err(err) = config.set("color", ParamValue::Text(swapped.to_owned())) {
            log::warn!("Could not adapt neon color to theme: {err}");
        }
    }

    fn update_config(&mut self, key: &str, config: &Schema) {
        if key == "density" {
            self.build_sections(config);
        }
    }

    fn draw(&mut self, surface: &mut Surface, config: &Schema) {
        let speed = config.number_or("speed", 0.5) as f32 * 10.0;
        for z in &mut self.sections {
            *z -= speed;
            if *z <= 1.0 {
                *z += MAX_Z;
            }
        }
        self.sections.sort_by(|a, b| b.total_cmp(a));

        let shape = outline(config.text("shapes").unwrap_or("Square"));
        let color = config.color_or("color", Color32::from_rgb(0x81, 0x8c, 0xf8));
        let width = config.number_or("width", 2.0) as f32;
        let center = self.center();

        for &z in &self.sections {
            let scale = FOCAL_LENGTH / z * SECTION_RADIUS;
            let points: Vec<Pos2> = shape
                .iter()
                .map(|p| pos2(center.x + p.x * scale, center.y + p.y * scale))
                .collect();
            let alpha = 1.0 - z / MAX_Z;
            surface.path(points, true, Stroke::new(width, faded(color, alpha)));
        }
    }
}
