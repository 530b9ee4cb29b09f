//! Cooldown-gated temporary invulnerability.
//!
//! The cooldown starts counting the moment the ability activates, so the
//! total lockout after a trigger equals the cooldown, not duration + cooldown.

/// Accumulated f32 frame deltas can leave a hair of residue on the timer at
/// the moment the window should close; anything at or below this counts as
/// expired.
const TIMER_EPSILON: f32 = 1e-4;

#[derive(Debug)]
pub struct Ability {
    active: bool,
    active_timer: f32,
    cooldown_timer: f32,
    duration: f32,
    cooldown: f32,
}

impl Ability {
    pub fn new(duration: f32, cooldown: f32) -> Self {
        Ability { active: false, active_timer: 0.0, cooldown_timer: 0.0, duration, cooldown }
    }

    /// Returns false without touching any state while the cooldown is running.
    pub fn activate(&mut self) -> bool {
        if self.cooldown_timer > 0.0 {
            return false;
        }
        self.active = true;
        self.active_timer = self.duration;
        self.cooldown_timer = self.cooldown;
        true
    }

    pub fn tick(&mut self, dt: f32) {
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer = (self.cooldown_timer - dt).max(0.0);
        }
        if self.active {
            self.active_timer -= dt;
            if self.active_timer <= TIMER_EPSILON {
                self.active = false;
                self.active_timer = 0.0;
            }
        }
    }

    pub fn reset(&mut self) {
        self.active = false;
        self.active_timer = 0.0;
        self.cooldown_timer = 0.0;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn active_remaining(&self) -> f32 {
        self.active_timer
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_timer
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_timer <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_from_idle() {
        let mut ability = Ability::new(3.0, 10.0);
        assert!(ability.activate());
        assert!(ability.is_active());
        assert_eq!(ability.active_remaining(), 3.0);
        assert_eq!(ability.cooldown_remaining(), 10.0);
    }

    #[test]
    fn test_second_activation_rejected() {
        let mut ability = Ability::new(3.0, 10.0);
        assert!(ability.activate());
        assert!(!ability.activate());
        // Timers untouched by the failed call
        assert_eq!(ability.active_remaining(), 3.0);
        assert_eq!(ability.cooldown_remaining(), 10.0);
    }

    #[test]
    fn test_active_window_then_cooldown() {
        let mut ability = Ability::new(3.0, 10.0);
        ability.activate();

        // Just short of the duration: still invulnerable
        for _ in 0..29 {
            ability.tick(0.1);
        }
        assert!(ability.is_active());

        ability.tick(0.1);
        assert!(!ability.is_active());
        assert_eq!(ability.active_remaining(), 0.0);
        // Cooldown keeps running from activation time
        assert!((ability.cooldown_remaining() - 7.0).abs() < 1e-3);
        assert!(!ability.activate());

        // Run out the rest of the cooldown
        for _ in 0..70 {
            ability.tick(0.1);
        }
        assert!(ability.is_ready());
        assert!(ability.activate());
    }

    #[test]
    fn test_reset_clears_timers() {
        let mut ability = Ability::new(3.0, 10.0);
        ability.activate();
        ability.tick(1.0);
        ability.reset();
        assert!(!ability.is_active());
        assert!(ability.is_ready());
        assert!(ability.activate());
    }

    #[test]
    fn test_tick_on_idle_is_noop() {
        let mut ability = Ability::new(3.0, 10.0);
        ability.tick(5.0);
        assert!(!ability.is_active());
        assert_eq!(ability.cooldown_remaining(), 0.0);
    }
}
