//! Pure numeric transforms on a falling body. Position integration is the
//! caller's job; these only touch velocity.

/// Vertical state of a moving body, in view units. Positive velocity points
/// down (screen-space convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub y: f32,
    pub velocity: f32,
}

impl Body {
    pub fn new(y: f32) -> Self {
        Body { y, velocity: 0.0 }
    }
}

pub fn apply_gravity(body: &mut Body, gravity: f32, dt: f32) {
    body.velocity += gravity * dt;
}

/// Impulse jump: overwrites velocity, it does not accumulate.
pub fn apply_jump(body: &mut Body, force: f32) {
    body.velocity = -force;
}

/// Caps fall speed only. Upward velocity is never clamped.
pub fn clamp_velocity(body: &mut Body, max_fall: f32) {
    if body.velocity > max_fall {
        body.velocity = max_fall;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_accumulates_velocity() {
        let mut body = Body::new(250.0);
        apply_gravity(&mut body, 1000.0, 0.1);
        assert_eq!(body.velocity, 100.0);
        // Position untouched
        assert_eq!(body.y, 250.0);
    }

    #[test]
    fn test_jump_overwrites_velocity() {
        let mut body = Body::new(250.0);
        body.velocity = 480.0;
        apply_jump(&mut body, 250.0);
        assert_eq!(body.velocity, -250.0);

        // Jumping while already rising still overwrites
        apply_jump(&mut body, 350.0);
        assert_eq!(body.velocity, -350.0);
    }

    #[test]
    fn test_clamp_caps_fall_speed_only() {
        let mut body = Body::new(0.0);
        body.velocity = 900.0;
        clamp_velocity(&mut body, 600.0);
        assert_eq!(body.velocity, 600.0);

        body.velocity = -900.0;
        clamp_velocity(&mut body, 600.0);
        assert_eq!(body.velocity, -900.0);
    }

    #[test]
    fn test_gravity_then_clamp_bounded() {
        let mut body = Body::new(0.0);
        for _ in 0..100 {
            apply_gravity(&mut body, 1000.0, 0.016);
            clamp_velocity(&mut body, 600.0);
            assert!(body.velocity <= 600.0);
        }
    }
}
