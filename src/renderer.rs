use eframe::egui::{self, Align2, FontId, Shape};

use crate::surface::{DrawCommand, Surface};

/// Replays a surface's display list onto an egui painter.
#[derive(Debug, Default)]
pub struct Renderer {
    frames_drawn: u64,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames replayed so far
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Paints `surface` inside its own rect
    ///
    /// Args:
    ///     painter (egui::Painter): The painter to draw with, clipped to the canvas
    ///     surface (Surface): The recorded frame
    pub fn render(&mut self, painter: &egui::Painter, surface: &Surface) {
        let rect = surface.rect();
        let offset = rect.min.to_vec2();

        for command in surface.commands() {
            match command {
                DrawCommand::Fill(color) => {
                    painter.rect_filled(rect, 0.0, *color);
                }
                DrawCommand::Circle { center, radius, fill } => {
                    painter.circle_filled(*center + offset, *radius, *fill);
                }
                DrawCommand::Line { from, to, stroke } => {
                    painter.line_segment([*from + offset, *to + offset], *stroke);
                }
                DrawCommand::Path { points, closed, stroke } => {
                    let points: Vec<_> = points.iter().map(|p| *p + offset).collect();
                    if *closed {
                        painter.add(Shape::closed_line(points, *stroke));
                    } else {
                        painter.add(Shape::line(points, *stroke));
                    }
                }
                DrawCommand::Glyph { pos, glyph, size, color } => {
                    painter.text(
                        *pos + offset,
                        Align2::LEFT_BOTTOM,
                        glyph,
                        FontId::monospace(*size),
                        *color,
                    );
                }
            }
        }

        self.frames_drawn += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{Color32, Stroke, pos2, vec2};

    #[test]
    fn test_render_basics() {
        let mut renderer = Renderer::new();
        let ctx = egui::Context::default();
        let mut surface = Surface::new(vec2(100.0, 100.0));
        surface.begin_frame(Color32::BLACK);
        surface.circle(pos2(50.0, 50.0), 4.0, Color32::WHITE);
        surface.line(pos2(0.0, 0.0), pos2(10.0, 10.0), Stroke::new(1.0, Color32::RED));
        surface.path(
            vec![pos2(0.0, 0.0), pos2(5.0, 5.0), pos2(10.0, 0.0)],
            true,
            Stroke::new(1.0, Color32::RED),
        );

        let layer_id = egui::LayerId::background();
        let painter = egui::Painter::new(ctx, layer_id, surface.rect());
        renderer.render(&painter, &surface);

        assert_eq!(renderer.frames_drawn(), 1);
    }
}
