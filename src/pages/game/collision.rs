/// Axis-aligned box in view units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        RectF { x, y, width, height }
    }
}

/// AABB overlap. Touching edges do not count as a collision.
pub fn check_collision(a: &RectF, b: &RectF) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}
