use eframe::egui::{Color32, Pos2, Vec2, pos2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{POINTER_AWAY, faded};
use crate::animation::{Animation, CreateContext};
use crate::schema::{ParamValue, Schema};
use crate::surface::Surface;
use crate::theme::Theme;

const GLYPHS: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
    '@', '#', '$', '%', '^', '&', '*', '(', ')',
];

/// Glyphs drawn behind each drop head, fading out
const TRAIL: usize = 14;
/// Chance per frame that a drop past the bottom restarts at the top
const RESTART_CHANCE: f32 = 0.025;
const POINTER_GLOW: f32 = 50.0;

const DARK_GREEN: &str = "#00ff41";
const LIGHT_GREEN: &str = "#1b5e20";

/// Columns of falling characters
#[derive(Debug)]
pub struct MatrixRain {
    rng: StdRng,
    size: Vec2,
    theme: Theme,
    pointer: Pos2,
    font_size: f32,
    /// Row of each column's head, in glyph units
    drops: Vec<f32>,
}

impl MatrixRain {
    pub fn schema() -> Schema {
        Schema::new()
            .range("speed", "Rain Speed", 0.1, 2.0, 0.1, 0.2)
            .range("density", "Font Size", 10.0, 30.0, 1.0, 16.0)
            .color("color", "Matrix Color", DARK_GREEN)
    }

    pub fn new(ctx: &CreateContext, config: &mut Schema) -> Self {
        let mut rain = Self {
            rng: StdRng::seed_from_u64(ctx.seed),
            size: ctx.size,
            theme: Theme::Dark,
            pointer: POINTER_AWAY,
            font_size: 16.0,
            drops: Vec::new(),
        };
        rain.set_theme(ctx.theme, config);
        rain.reset_drops(config);
        rain
    }

    fn reset_drops(&mut self, config: &Schema) {
        self.font_size = config.number_or("density", 16.0).round().max(1.0) as f32;
        let columns = (self.size.x / self.font_size).ceil().max(0.0) as usize;
        let rows = self.size.y / self.font_size;
        let rng = &mut self.rng;
        self.drops = (0..columns).map(|_| -rng.r#gen::<f32>() * rows).collect();
    }

    fn background(&self) -> Color32 {
        match self.theme {
            Theme::Dark => Color32::BLACK,
            Theme::Light => Color32::from_rgb(232, 245, 233),
        }
    }
}

impl Animation for MatrixRain {
    fn resize(&mut self, size: Vec2, config: &Schema) {
        self.size = size;
        self.reset_drops(config);
    }

    fn pointer_move(&mut self, pos: Pos2) {
        self.pointer = pos;
    }

    fn set_theme(&mut self, theme: Theme, config: &mut Schema) {
        self.theme = theme;
        let swapped = match (theme, config.text("color")) {
            (Theme::Dark, Some(LIGHT_GREEN)) => DARK_GREEN,
            (Theme::Light, Some(DARK_GREEN)) => LIGHT_GREEN,
            _ => return,
        };
        if let Err(err) = config.set("color", ParamValue::Text(swapped.to_owned())) {
            log::warn!("Could not adapt rain color to theme: {err}");
        }
    }

    fn update_config(&mut self, key: &str, config: &Schema) {
        if key == "density" {
            self.reset_drops(config);
        }
    }

    fn draw(&mut self, surface: &mut Surface, config: &Schema) {
        surface.fill(self.background());

        let speed = config.number_or("speed", 0.2) as f32;
        let color = config.color_or("color", Color32::GREEN);
        let font_size = self.font_size;
        let height = self.size.y;

        for (column, drop) in self.drops.iter_mut().enumerate() {
            let head = drop.floor() as i64;
            let x = column as f32 * font_size;

            for offset in 0..TRAIL {
                let row = head - offset as i64;
                if row < 0 {
                    break;
                }
                let y = row as f32 * font_size;
                let index = (column as i64 * 13 + row * 2333).rem_euclid(GLYPHS.len() as i64);
                let near_pointer = (x - self.pointer.x).abs() < POINTER_GLOW
                    && (y - self.pointer.y).abs() < POINTER_GLOW;
                let tint = if offset == 0 && near_pointer {
                    Color32::WHITE
                } else {
                    faded(color, 1.0 - offset as f32 / TRAIL as f32)
                };
                surface.glyph(pos2(x, y), GLYPHS[index as usize], font_size, tint);
            }

            if *drop * font_size > height && self.rng.r#gen::<f32>() < RESTART_CHANCE {
                *drop = 0.0;
            }
            *drop += speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::vec2;

    fn create(theme: Theme) -> (MatrixRain, Schema) {
        let mut config = MatrixRain::schema();
        let ctx = CreateContext {
            size: vec2(320.0, 240.0),
            theme,
            seed: 3,
        };
        (MatrixRain::new(&ctx, &mut config), config)
    }

    #[test]
    fn test_one_column_per_glyph_width() {
        let (mut rain, mut config) = create(Theme::Dark);
        assert_eq!(rain.drops.len(), 20);

        config.apply("density", 20.0.into()).unwrap();
        rain.update_config("density", &config);
        assert_eq!(rain.drops.len(), 16);
    }

    #[test]
    fn test_drops_advance_by_speed() {
        let (mut rain, config) = create(Theme::Dark);
        rain.drops = vec![1.0; rain.drops.len()];
        let mut surface = Surface::new(vec2(320.0, 240.0));
        rain.draw(&mut surface, &config);
        assert!(rain.drops.iter().all(|drop| (*drop - 1.2).abs() < 1e-5));
    }

    #[test]
    fn test_theme_swaps_green() {
        let (mut rain, mut config) = create(Theme::Light);
        assert_eq!(config.text("color"), Some(LIGHT_GREEN));
        rain.set_theme(Theme::Dark, &mut config);
        assert_eq!(config.text("color"), Some(DARK_GREEN));
    }

    #[test]
    fn test_zero_width_has_no_columns() {
        let (mut rain, config) = create(Theme::Dark);
        rain.resize(Vec2::ZERO, &config);
        assert!(rain.drops.is_empty());
    }
}
