//! Collision detection between the player circle and obstacle rectangles
//!
//! Obstacles are axis-aligned, so the closest point on a body to the player's
//! center is a per-axis clamp.

use glam::Vec2;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle centered on `center` spanning `size` in total
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Closed containment test
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Point on (or in) the rectangle nearest to `point`, clamped per axis
    #[inline]
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }
}

/// Check if a circle overlaps a rectangle.
///
/// Touching at exactly `radius` is not a hit.
pub fn circle_rect_collision(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.closest_point(center);
    let dx = center.x - closest.x;
    let dy = center.y - closest.y;
    (dx * dx + dy * dy).sqrt() < radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body() -> Rect {
        Rect::from_center(Vec2::new(100.0, 100.0), Vec2::new(60.0, 20.0))
    }

    #[test]
    fn test_center_inside_collides() {
        assert!(circle_rect_collision(Vec2::new(100.0, 100.0), 8.0, &body()));
        assert!(circle_rect_collision(Vec2::new(75.0, 95.0), 8.0, &body()));
    }

    #[test]
    fn test_edge_overlap_collides() {
        // Body spans x 70..130, y 90..110
        assert!(circle_rect_collision(Vec2::new(65.0, 100.0), 8.0, &body()));
        assert!(circle_rect_collision(Vec2::new(100.0, 117.0), 8.0, &body()));
    }

    #[test]
    fn test_exact_touch_is_a_miss() {
        assert!(!circle_rect_collision(Vec2::new(62.0, 100.0), 8.0, &body()));
    }

    #[test]
    fn test_corner_uses_euclidean_distance() {
        // 6/8 off each axis from corner (130, 110) -> distance 10
        assert!(!circle_rect_collision(Vec2::new(136.0, 118.0), 8.0, &body()));
        assert!(circle_rect_collision(Vec2::new(136.0, 118.0), 10.5, &body()));
    }

    #[test]
    fn test_far_miss() {
        assert!(!circle_rect_collision(Vec2::new(300.0, 10.0), 8.0, &body()));
    }

    #[test]
    fn test_rect_helpers() {
        let rect = body();
        assert_eq!(rect.center(), Vec2::new(100.0, 100.0));
        assert_eq!(rect.size(), Vec2::new(60.0, 20.0));
        assert!(rect.contains(Vec2::new(70.0, 90.0)));
        assert!(!rect.contains(Vec2::new(69.0, 90.0)));
        assert_eq!(rect.closest_point(Vec2::new(0.0, 0.0)), Vec2::new(70.0, 90.0));
    }

    proptest! {
        #[test]
        fn prop_inside_always_collides(
            cx in -500.0f32..500.0, cy in -500.0f32..500.0,
            w in 1.0f32..100.0, h in 1.0f32..100.0,
            tx in 0.01f32..0.99, ty in 0.01f32..0.99,
            r in 0.1f32..20.0,
        ) {
            let rect = Rect::from_center(Vec2::new(cx, cy), Vec2::new(w, h));
            let p = Vec2::new(rect.min.x + tx * w, rect.min.y + ty * h);
            prop_assert!(circle_rect_collision(p, r, &rect));
        }

        #[test]
        fn prop_symmetric_under_reflection(
            cx in -200.0f32..200.0, cy in -200.0f32..200.0,
            w in 1.0f32..100.0, h in 1.0f32..100.0,
            px in -300.0f32..300.0, py in -300.0f32..300.0,
            r in 0.1f32..30.0,
        ) {
            let rect = Rect::from_center(Vec2::new(cx, cy), Vec2::new(w, h));
            let hit = circle_rect_collision(Vec2::new(px, py), r, &rect);

            let mirror_x = Rect::from_center(Vec2::new(-cx, cy), Vec2::new(w, h));
            prop_assert_eq!(hit, circle_rect_collision(Vec2::new(-px, py), r, &mirror_x));

            let mirror_y = Rect::from_center(Vec2::new(cx, -cy), Vec2::new(w, h));
            prop_assert_eq!(hit, circle_rect_collision(Vec2::new(px, -py), r, &mirror_y));
        }
    }
}
