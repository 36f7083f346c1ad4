use std::f32::consts::TAU;

use eframe::egui::{Color32, Pos2, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{count, faded, random_point};
use crate::animation::{Animation, CreateContext};
use crate::schema::Schema;
use crate::surface::Surface;
use crate::theme::Theme;

/// Concentric discs used to fake a blurred glow
const GLOW_STEPS: usize = 8;

const DARK_PALETTE: &[Color32] = &[
    Color32::from_rgb(0x22, 0xd3, 0xee),
    Color32::from_rgb(0xa7, 0x8b, 0xfa),
    Color32::from_rgb(0x34, 0xd3, 0x99),
    Color32::from_rgb(0xf4, 0x72, 0xb6),
];

const LIGHT_PALETTE: &[Color32] = &[
    Color32::from_rgb(0x7d, 0xd3, 0xfc),
    Color32::from_rgb(0xc4, 0xb5, 0xfd),
    Color32::from_rgb(0x86, 0xef, 0xac),
    Color32::from_rgb(0xfb, 0xcf, 0xe8),
];

#[derive(Debug, Clone)]
struct Layer {
    pos: Pos2,
    velocity: Vec2,
    /// Relative to the base size parameter
    scale: f32,
    phase: f32,
    color: Color32,
}

/// Large soft blobs of color drifting across the surface
#[derive(Debug)]
pub struct Aurora {
    rng: StdRng,
    size: Vec2,
    theme: Theme,
    /// Colors picked by the last "randomize", replacing the theme palette
    custom_palette: Vec<Color32>,
    time: f32,
    layers: Vec<Layer>,
}

impl Aurora {
    pub fn schema() -> Schema {
        Schema::new()
            .range("count", "Layer Count", 1.0, 20.0, 1.0, 5.0)
            .range("speed", "Speed Multiplier", 0.1, 5.0, 0.1, 1.0)
            .range("size", "Base Size", 100.0, 800.0, 1.0, 400.0)
            .button("randomize", "Randomize Colors")
    }

    pub fn new(ctx: &CreateContext, config: &mut Schema) -> Self {
        let mut aurora = Self {
            rng: StdRng::seed_from_u64(ctx.seed),
            size: ctx.size,
            theme: ctx.theme,
            custom_palette: Vec::new(),
            time: 0.0,
            layers: Vec::new(),
        };
        aurora.build_layers(config);
        aurora
    }

    fn palette(&self) -> &[Color32] {
        if !self.custom_palette.is_empty() {
            &self.custom_palette
        } else if self.theme.is_dark() {
            DARK_PALETTE
        } else {
            LIGHT_PALETTE
        }
    }

    fn build_layers(&mut self, config: &Schema) {
        let wanted = count(config.number_or("count", 5.0));
        let mut layers = Vec::with_capacity(wanted);
        for index in 0..wanted {
            let color = self.palette()[index % self.palette().len()];
            layers.push(Layer {
                pos: random_point(&mut self.rng, self.size),
                velocity: Vec2::angled(self.rng.r#gen::<f32>() * TAU) * 0.5,
                scale: 0.6 + self.rng.r#gen::<f32>() * 0.8,
                phase: self.rng.r#gen::<f32>() * TAU,
                color,
            });
        }
        self.layers = layers;
    }

    fn recolor(&mut self) {
        let palette = self.palette().to_vec();
        for (index, layer) in self.layers.iter_mut().enumerate() {
            layer.color = palette[index % palette.len()];
        }
    }

    fn randomize_palette(&mut self) {
        let rng = &mut self.rng;
        self.custom_palette = (0..DARK_PALETTE.len())
            .map(|_| {
                Color32::from_rgb(
                    rng.gen_range(64..=255),
                    rng.gen_range(64..=255),
                    rng.gen_range(64..=255),
                )
            })
            .collect();
        self.recolor();
    }
}

impl Animation for Aurora {
    fn resize(&mut self, size: Vec2, config: &Schema) {
        self.size = size;
        self.build_layers(config);
    }

    fn set_theme(&mut self, theme: Theme, _config: &mut Schema) {
        self.theme = theme;
        self.recolor();
    }

    fn update_config(&mut self, key: &str, config: &Schema) {
        match key {
            "count" => self.build_layers(config),
            "randomize" => self.randomize_palette(),
            _ => {}
        }
    }

    fn draw(&mut self, surface: &mut Surface, config: &Schema) {
        let speed = config.number_or("speed", 1.0) as f32;
        let base = config.number_or("size", 400.0) as f32;
        let size = self.size;
        self.time += 0.01 * speed;

        for layer in &mut self.layers {
            layer.pos += layer.velocity * speed;
            if layer.pos.x < 0.0 || layer.pos.x > size.x {
                layer.velocity.x = -layer.velocity.x;
                layer.pos.x = layer.pos.x.clamp(0.0, size.x);
            }
            if layer.pos.y < 0.0 || layer.pos.y > size.y {
                layer.velocity.y = -layer.velocity.y;
                layer.pos.y = layer.pos.y.clamp(0.0, size.y);
            }

            let breathing = 1.0 + 0.15 * (self.time + layer.phase).sin();
            let radius = base * layer.scale * breathing * 0.5;
            for step in 0..GLOW_STEPS {
                let t = step as f32 / GLOW_STEPS as f32;
                surface.circle(layer.pos, radius * (1.0 - t), faded(layer.color, 0.06));
            }
        }
    }
}
