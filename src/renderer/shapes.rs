//! Tessellation of draw commands into triangle lists

use glam::Vec2;
use std::f32::consts::PI;

use super::draw::DrawCommand;
use super::vertex::{Color, Vertex};

/// Segments used for circles
pub const CIRCLE_SEGMENTS: u32 = 24;

/// Triangulate a whole draw list in order
pub fn tessellate(commands: &[DrawCommand]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for command in commands {
        match *command {
            DrawCommand::FillRect { min, max, color } => {
                vertices.extend(rect(min, max, color));
            }
            DrawCommand::StrokeRect {
                min,
                max,
                width,
                color,
            } => {
                vertices.extend(stroke_rect(min, max, width, color));
            }
            DrawCommand::FillCircle {
                center,
                radius,
                color,
            } => {
                vertices.extend(circle(center, radius, color, CIRCLE_SEGMENTS));
            }
            DrawCommand::Line {
                from,
                to,
                width,
                color,
            } => {
                vertices.extend(line(from, to, width, color));
            }
        }
    }
    vertices
}

/// Two triangles covering an axis-aligned rectangle
pub fn rect(min: Vec2, max: Vec2, color: Color) -> Vec<Vertex> {
    quad(
        [
            Vec2::new(min.x, min.y),
            Vec2::new(max.x, min.y),
            Vec2::new(min.x, max.y),
            Vec2::new(max.x, max.y),
        ],
        color,
    )
}

/// Rectangle outline drawn inside the bounds
pub fn stroke_rect(min: Vec2, max: Vec2, width: f32, color: Color) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(24);
    // Top, bottom, left, right
    vertices.extend(rect(min, Vec2::new(max.x, min.y + width), color));
    vertices.extend(rect(Vec2::new(min.x, max.y - width), max, color));
    vertices.extend(rect(min, Vec2::new(min.x + width, max.y), color));
    vertices.extend(rect(Vec2::new(max.x - width, min.y), max, color));
    vertices
}

/// Thick line segment as a quad
pub fn line(from: Vec2, to: Vec2, width: f32, color: Color) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    quad([from + perp, from - perp, to + perp, to - perp], color)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Color, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Corners ordered a-b on one side, c-d on the other
fn quad(corners: [Vec2; 4], color: Color) -> Vec<Vertex> {
    let [a, b, c, d] = corners;
    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}
