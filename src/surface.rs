use eframe::egui::{Color32, Pos2, Rect, Stroke, Vec2, pos2};

/// One primitive recorded on the [`Surface`] during a frame.
///
/// Coordinates are surface-local: `(0, 0)` is the top-left corner of the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Paint the whole surface
    Fill(Color32),
    Circle {
        center: Pos2,
        radius: f32,
        fill: Color32,
    },
    Line {
        from: Pos2,
        to: Pos2,
        stroke: Stroke,
    },
    Path {
        points: Vec<Pos2>,
        closed: bool,
        stroke: Stroke,
    },
    Glyph {
        pos: Pos2,
        glyph: char,
        size: f32,
        color: Color32,
    },
}

/// The drawing target shared by the host and exactly one animation instance.
///
/// The surface records a display list per frame; the [`Renderer`](crate::Renderer)
/// replays it onto an egui painter.
#[derive(Debug, Clone)]
pub struct Surface {
    rect: Rect,
    commands: Vec<DrawCommand>,
}

impl Surface {
    pub fn new(size: Vec2) -> Self {
        Self {
            rect: Rect::from_min_size(Pos2::ZERO, size),
            commands: Vec::new(),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn size(&self) -> Vec2 {
        self.rect.size()
    }

    /// Moves the surface to `rect` on screen. Returns true if its size changed.
    pub fn set_rect(&mut self, rect: Rect) -> bool {
        let resized = rect.size() != self.rect.size();
        self.rect = rect;
        resized
    }

    /// Converts a screen position into surface-local coordinates
    pub fn to_local(&self, screen: Pos2) -> Pos2 {
        pos2(screen.x - self.rect.min.x, screen.y - self.rect.min.y)
    }

    /// Drops last frame's display list and paints the background
    pub fn begin_frame(&mut self, background: Color32) {
        self.commands.clear();
        self.commands.push(DrawCommand::Fill(background));
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn fill(&mut self, color: Color32) {
        self.commands.push(DrawCommand::Fill(color));
    }

    pub fn circle(&mut self, center: Pos2, radius: f32, fill: Color32) {
        if radius > 0.0 {
            self.commands.push(DrawCommand::Circle {
                center,
                radius,
                fill,
            });
        }
    }

    pub fn line(&mut self, from: Pos2, to: Pos2, stroke: impl Into<Stroke>) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            stroke: stroke.into(),
        });
    }

    pub fn path(&mut self, points: Vec<Pos2>, closed: bool, stroke: impl Into<Stroke>) {
        if points.len() >= 2 {
            self.commands.push(DrawCommand::Path {
                points,
                closed,
                stroke: stroke.into(),
            });
        }
    }

    pub fn glyph(&mut self, pos: Pos2, glyph: char, size: f32, color: Color32) {
        self.commands.push(DrawCommand::Glyph {
            pos,
            glyph,
            size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::vec2;

    #[test]
    fn test_set_rect_reports_size_changes_only() {
        let mut surface = Surface::new(vec2(100.0, 50.0));
        let moved = Rect::from_min_size(pos2(10.0, 10.0), vec2(100.0, 50.0));
        assert!(!surface.set_rect(moved));
        assert!(surface.set_rect(Rect::from_min_size(pos2(10.0, 10.0), vec2(80.0, 50.0))));
    }

    #[test]
    fn test_to_local_translates_screen_coordinates() {
        let mut surface = Surface::new(Vec2::ZERO);
        surface.set_rect(Rect::from_min_size(pos2(200.0, 40.0), vec2(300.0, 300.0)));
        assert_eq!(surface.to_local(pos2(250.0, 60.0)), pos2(50.0, 20.0));
    }

    #[test]
    fn test_begin_frame_resets_display_list() {
        let mut surface = Surface::new(vec2(10.0, 10.0));
        surface.begin_frame(Color32::BLACK);
        surface.circle(pos2(1.0, 1.0), 2.0, Color32::WHITE);
        surface.circle(pos2(1.0, 1.0), 0.0, Color32::WHITE);
        assert_eq!(surface.commands().len(), 2);

        surface.begin_frame(Color32::WHITE);
        assert_eq!(surface.commands(), [DrawCommand::Fill(Color32::WHITE)]);
    }
}
