use eframe::egui::{Color32, Pos2, Stroke, Vec2, vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{POINTER_AWAY, count, faded, random_point};
use crate::animation::{Animation, CreateContext};
use crate::schema::{ParamValue, Schema};
use crate::surface::Surface;
use crate::theme::Theme;

/// Radius around the pointer inside which particles are pushed away
const REPEL_RADIUS: f32 = 200.0;
const REPEL_FORCE: f32 = 5.0;

#[derive(Debug, Clone)]
struct Particle {
    pos: Pos2,
    /// Direction of travel; scaled by the speed parameter every frame
    heading: Vec2,
    radius: f32,
}

/// Drifting dots linked by lines when they come close to each other
#[derive(Debug)]
pub struct Particles {
    rng: StdRng,
    size: Vec2,
    pointer: Pos2,
    particles: Vec<Particle>,
}

impl Particles {
    pub fn schema() -> Schema {
        Schema::new()
            .range("count", "Particle Count", 20.0, 200.0, 1.0, 80.0)
            .range("speed", "Speed", 0.1, 5.0, 0.1, 1.0)
            .range("width", "Line Width", 0.1, 5.0, 0.1, 1.0)
            .range("opacity", "Line Opacity", 0.1, 1.0, 0.05, 1.0)
            .range("connectDist", "Link Distance", 50.0, 300.0, 1.0, 150.0)
            .color("color", "Color", "#ffffff")
    }

    pub fn new(ctx: &CreateContext, config: &mut Schema) -> Self {
        match_theme(ctx.theme, config);
        let mut particles = Self {
            rng: StdRng::seed_from_u64(ctx.seed),
            size: ctx.size,
            pointer: POINTER_AWAY,
            particles: Vec::new(),
        };
        particles.populate(config);
        particles
    }

    fn populate(&mut self, config: &Schema) {
        let wanted = count(config.number_or("count", 80.0));
        let size = self.size;
        let rng = &mut self.rng;
        self.particles = (0..wanted)
            .map(|_| Particle {
                pos: random_point(rng, size),
                heading: vec2(rng.r#gen::<f32>() - 0.5, rng.r#gen::<f32>() - 0.5),
                radius: rng.r#gen::<f32>() * 2.0 + 1.0,
            })
            .collect();
    }

    fn step(&mut self, speed: f32) {
        let size = self.size;
        for particle in &mut self.particles {
            particle.pos += particle.heading * speed;

            if particle.pos.x < 0.0 {
                particle.pos.x = size.x;
            } else if particle.pos.x > size.x {
                particle.pos.x = 0.0;
            }
            if particle.pos.y < 0.0 {
                particle.pos.y = size.y;
            } else if particle.pos.y > size.y {
                particle.pos.y = 0.0;
            }

            let away = particle.pos - self.pointer;
            let distance = away.length();
            if distance > 0.0 && distance < REPEL_RADIUS {
                let force = (REPEL_RADIUS - distance) / REPEL_RADIUS;
                particle.pos += away / distance * force * REPEL_FORCE;
            }
        }
    }
}

/// A white network vanishes on the light background, so it flips to black
fn match_theme(theme: Theme, config: &mut Schema) {
    let swapped = match (theme, config.text("color")) {
        (Theme::Light, Some("#ffffff")) => "#000000",
        (Theme::Dark, Some("#000000")) => "#ffffff",
        _ => return,
    };
    if let Err(err) = config.set("color", ParamValue::Text(swapped.to_owned())) {
        log::warn!("Could not adapt particle color to theme: {err}");
    }
}

impl Animation for Particles {
    fn resize(&mut self, size: Vec2, config: &Schema) {
        self.size = size;
        self.populate(config);
    }

    fn pointer_move(&mut self, pos: Pos2) {
        self.pointer = pos;
    }

    fn set_theme(&mut self, theme: Theme, config: &mut Schema) {
        let color = if theme.is_dark() { "#ffffff" } else { "#000000" };
        if let Err(err) = config.set("color", ParamValue::Text(color.to_owned())) {
            log::warn!("Could not adapt particle color to theme: {err}");
        }
    }

    fn update_config(&mut self, key: &str, config: &Schema) {
        if key == "count" {
            self.populate(config);
        }
    }

    fn draw(&mut self, surface: &mut Surface, config: &Schema) {
        self.step(config.number_or("speed", 1.0) as f32);

        let color = config.color_or("color", Color32::WHITE);
        let opacity = config.number_or("opacity", 1.0) as f32;
        let width = config.number_or("width", 1.0) as f32;
        let max_dist = config.number_or("connectDist", 150.0) as f32;

        for particle in &self.particles {
            surface.circle(particle.pos, particle.radius, faded(color, opacity));
        }

        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let dist = a.pos.distance(b.pos);
                if dist < max_dist {
                    let alpha = (1.0 - dist / max_dist) * opacity;
                    surface.line(a.pos, b.pos, Stroke::new(width, faded(color, alpha)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DrawCommand;

    fn create(theme: Theme) -> (Particles, Schema) {
        let mut config = Particles::schema();
        let ctx = CreateContext {
            size: vec2(800.0, 600.0),
            theme,
            seed: 42,
        };
        (Particles::new(&ctx, &mut config), config)
    }

    #[test]
    fn test_population_follows_count() {
        let (mut particles, mut config) = create(Theme::Dark);
        assert_eq!(particles.particles.len(), 80);

        config.apply("count", 150.0.into()).unwrap();
        particles.update_config("count", &config);
        assert_eq!(particles.particles.len(), 150);
    }

    #[test]
    fn test_visual_keys_do_not_repopulate() {
        let (mut particles, mut config) = create(Theme::Dark);
        let before: Vec<Pos2> = particles.particles.iter().map(|p| p.pos).collect();

        config.apply("width", 3.0.into()).unwrap();
        particles.update_config("width", &config);

        let after: Vec<Pos2> = particles.particles.iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_light_theme_uses_dark_lines() {
        let (mut particles, mut config) = create(Theme::Light);
        assert_eq!(config.text("color"), Some("#000000"));

        particles.set_theme(Theme::Dark, &mut config);
        assert_eq!(config.text("color"), Some("#ffffff"));
    }

    #[test]
    fn test_draw_records_one_dot_per_particle() {
        let (mut particles, config) = create(Theme::Dark);
        let mut surface = Surface::new(vec2(800.0, 600.0));
        particles.draw(&mut surface, &config);

        let dots = surface
            .commands()
            .iter()
            .filter(|command| matches!(command, DrawCommand::Circle { .. }))
            .count();
        assert_eq!(dots, 80);
    }

    #[test]
    fn test_particles_stay_on_surface() {
        let (mut particles, config) = create(Theme::Dark);
        particles.pointer_move(Pos2::new(400.0, 300.0));
        for _ in 0..200 {
            particles.step(config.number_or("speed", 1.0) as f32);
        }
        for particle in &particles.particles {
            assert!(particle.pos.x >= -REPEL_FORCE && particle.pos.x <= 800.0 + REPEL_FORCE);
            assert!(particle.pos.y >= -REPEL_FORCE && particle.pos.y <= 600.0 + REPEL_FORCE);
        }
    }
}
