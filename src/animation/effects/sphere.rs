use std::f32::consts::{PI, TAU};

use eframe::egui::{Color32, Pos2, Stroke, Vec2, pos2};

use super::faded;
use crate::animation::{Animation, CreateContext};
use crate::schema::{ParamValue, Schema};
use crate::surface::Surface;
use crate::theme::Theme;

/// Samples along each latitude/longitude line
const SEGMENTS: usize = 48;
const CAMERA_DISTANCE: f32 = 3.0;

const DARK_WIRE: &str = "#c084fc";
const LIGHT_WIRE: &str = "#a855f7";

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Rotation {
    x: f32,
    y: f32,
}

/// A rotating globe drawn from latitude and longitude lines
#[derive(Debug)]
pub struct Sphere {
    size: Vec2,
    pointer: Pos2,
    rotation: Rotation,
}

impl Sphere {
    pub fn schema() -> Schema {
        Schema::new()
            .range("radius", "Radius", 50.0, 400.0, 1.0, 200.0)
            .range("density", "Grid Density", 10.0, 50.0, 1.0, 20.0)
            .range("width", "Line Width", 0.5, 5.0, 0.5, 1.5)
            .range("speed", "Auto Rotation", 0.0, 0.1, 0.001, 0.01)
            .color("color", "Wire Color", DARK_WIRE)
    }

    pub fn new(ctx: &CreateContext, config: &mut Schema) -> Self {
        let mut sphere = Self {
            size: ctx.size,
            pointer: (ctx.size / 2.0).to_pos2(),
            rotation: Rotation::default(),
        };
        sphere.set_theme(ctx.theme, config);
        sphere
    }

    /// Rotates a unit-sphere point and projects it with perspective.
    ///
    /// Returns the screen point and its depth in `-1..=1` (1 = nearest).
    fn project(&self, point: [f32; 3], center: Pos2, radius: f32) -> (Pos2, f32) {
        let [x, y, z] = point;
        let (sin_y, cos_y) = self.rotation.y.sin_cos();
        let (sin_x, cos_x) = self.rotation.x.sin_cos();

        let x1 = x * cos_y - z * sin_y;
        let z1 = x * sin_y + z * cos_y;
        let y2 = y * cos_x - z1 * sin_x;
        let z2 = y * sin_x + z1 * cos_x;

        let perspective = CAMERA_DISTANCE / (CAMERA_DISTANCE - z2);
        (
            pos2(center.x + x1 * radius * perspective, center.y + y2 * radius * perspective),
            z2,
        )
    }

    fn draw_line(
        &self,
        surface: &mut Surface,
        points: impl Iterator<Item = [f32; 3]>,
        center: Pos2,
        radius: f32,
        stroke: Stroke,
    ) {
        let mut projected = Vec::with_capacity(SEGMENTS + 1);
        let mut depth = 0.0;
        for point in points {
            let (screen, z) = self.project(point, center, radius);
            projected.push(screen);
            depth += z;
        }
        let mean_depth = depth / projected.len().max(1) as f32;
        // Lines on the far side are dimmer
        let alpha = 0.35 + 0.65 * (mean_depth + 1.0) / 2.0;
        surface.path(projected, false, Stroke::new(stroke.width, faded(stroke.color, alpha)));
    }
}

impl Animation for Sphere {
    fn resize(&mut self, size: Vec2, _config: &Schema) {
        self.size = size;
        self.pointer = (size / 2.0).to_pos2();
    }

    fn pointer_move(&mut self, pos: Pos2) {
        self.pointer = pos;
    }

    fn set_theme(&mut self, theme: Theme, config: &mut Schema) {
        let swapped = match (theme, config.text("color")) {
            (Theme::Dark, Some(LIGHT_WIRE)) => DARK_WIRE,
            (Theme::Light, Some(DARK_WIRE)) => LIGHT_WIRE,
            _ => return,
        };
        if let Err(err) = config.set("color", ParamValue::Text(swapped.to_owned())) {
            log::warn!("Could not adapt wire color to theme: {err}");
        }
    }

    fn update_config(&mut self, _key: &str, _config: &Schema) {}

    fn draw(&mut self, surface: &mut Surface, config: &Schema) {
        let speed = config.number_or("speed", 0.01) as f32;
        let lines = super::count(config.number_or("density", 20.0)).max(2);
        let radius = config.number_or("radius", 200.0) as f32;
        let stroke = Stroke::new(
            config.number_or("width", 1.5) as f32,
            config.color_or("color", Color32::from_rgb(0xc0, 0x84, 0xfc)),
        );

        let center = (self.size / 2.0).to_pos2();
        let tilt = if self.size.y > 0.0 {
            (self.pointer.y - center.y) / self.size.y
        } else {
            0.0
        };
        self.rotation.y = (self.rotation.y + speed) % TAU;
        self.rotation.x += (tilt * 0.8 - self.rotation.x) * 0.05;

        for i in 1..lines {
            let latitude = PI * i as f32 / lines as f32 - PI / 2.0;
            let (sin_lat, cos_lat) = latitude.sin_cos();
            let ring = (0..=SEGMENTS).map(|s| {
                let longitude = TAU * s as f32 / SEGMENTS as f32;
                [cos_lat * longitude.cos(), sin_lat, cos_lat * longitude.sin()]
            });
            self.draw_line(surface, ring, center, radius, stroke);
        }

        for i in 0..lines {
            let longitude = TAU * i as f32 / lines as f32;
            let (sin_lon, cos_lon) = longitude.sin_cos();
            let meridian = (0..=SEGMENTS).map(|s| {
                let latitude = PI * s as f32 / SEGMENTS as f32 - PI / 2.0;
                [latitude.cos() * cos_lon, latitude.sin(), latitude.cos() * sin_lon]
            });
            self.draw_line(surface, meridian, center, radius, stroke);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use eframe::egui::vec2;

    fn create() -> (Sphere, Schema) {
        let mut config = Sphere::schema();
        let ctx = CreateContext {
            size: vec2(600.0, 600.0),
            theme: Theme::Dark,
            seed: 0,
        };
        (Sphere::new(&ctx, &mut config), config)
    }

    #[test]
    fn test_grid_density_sets_line_count() {
        let (mut sphere, mut config) = create();
        let mut surface = Surface::new(vec2(600.0, 600.0));
        sphere.draw(&mut surface, &config);
        assert_eq!(surface.commands().len(), 19 + 20);

        config.apply("density", 10.0.into()).unwrap();
        sphere.update_config("density", &config);
        let mut surface = Surface::new(vec2(600.0, 600.0));
        sphere.draw(&mut surface, &config);
        assert_eq!(surface.commands().len(), 9 + 10);
    }

    #[test]
    fn test_projection_keeps_points_near_the_radius() {
        let (sphere, _) = create();
        let center = pos2(300.0, 300.0);
        let (front, depth) = sphere.project([0.0, 0.0, 1.0], center, 100.0);
        assert!((depth - 1.0).abs() < 1e-5);
        assert_eq!(front, center);

        let (side, _) = sphere.project([1.0, 0.0, 0.0], center, 100.0);
        assert!((side.x - 400.0).abs() < 1e-3);
    }

    #[test]
    fn test_custom_wire_color_survives_theme_switch() {
        let (mut sphere, mut config) = create();
        sphere.set_theme(Theme::Light, &mut config);
        assert_eq!(config.text("color"), Some(LIGHT_WIRE));

        config.apply("color", "#123456".into()).unwrap();
        sphere.set_theme(Theme::Dark, &mut config);
        assert_eq!(config.text("color"), Some("#123456"));
    }

    #[test]
    fn test_zero_speed_stops_rotation() {
        let (mut sphere, mut config) = create();
        config.apply("speed", 0.0.into()).unwrap();
        let mut surface = Surface::new(vec2(600.0, 600.0));
        sphere.draw(&mut surface, &config);
        assert_eq!(sphere.rotation.y, 0.0);
    }
}
