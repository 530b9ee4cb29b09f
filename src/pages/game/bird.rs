//! The player-controlled actor: vertical physics, rotation smoothing, wing
//! animation and the death-animation sub-state.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::collision::RectF;
use super::physics::{self, Body};
use crate::constants::game;

#[derive(Debug)]
pub struct Bird {
    x: f32,
    body: Body,
    rotation: f32,
    wing_phase: f32,
    dying: bool,
    death_elapsed: f32,
    death_finished: bool,
}

impl Bird {
    pub fn new() -> Self {
        Bird {
            x: game::BIRD_X,
            body: Body::new(game::BIRD_START_Y),
            rotation: 0.0,
            wing_phase: 0.0,
            dying: false,
            death_elapsed: 0.0,
            death_finished: false,
        }
    }

    /// Back to the initial pose. The bird is reused across rounds.
    pub fn reset(&mut self) {
        self.body = Body::new(game::BIRD_START_Y);
        self.rotation = 0.0;
        self.wing_phase = 0.0;
        self.dying = false;
        self.death_elapsed = 0.0;
        self.death_finished = false;
    }

    /// One live-branch step. Returns true when the bird hit the floor this
    /// frame; the orchestrator decides what happens next.
    pub fn update_live(&mut self, jump: bool, gravity: f32, dt: f32) -> bool {
        if jump {
            physics::apply_jump(&mut self.body, game::JUMP_FORCE);
            self.wing_phase = 0.0;
        }
        physics::apply_gravity(&mut self.body, gravity, dt);
        physics::clamp_velocity(&mut self.body, game::MAX_FALL_SPEED);
        self.body.y += self.body.velocity * dt;

        // Nose-down tilt capped at 90 degrees; nose-up follows velocity freely
        let target = (self.body.velocity * game::ROTATION_VELOCITY_SCALE).min(FRAC_PI_2);
        self.rotation += (target - self.rotation) * game::ROTATION_SMOOTHING;

        let wing_rate =
            if self.body.velocity < 0.0 { game::WING_RATE_UP } else { game::WING_RATE_DOWN };
        self.wing_phase = (self.wing_phase + wing_rate * dt) % TAU;

        if self.body.y < 0.0 {
            self.body.y = 0.0;
            self.body.velocity = 0.0;
        }
        self.body.y + game::BIRD_HEIGHT >= game::VIEW_HEIGHT
    }

    /// One death-animation step: faster fall, tumble toward upside-down,
    /// wings frozen. Finishes on floor contact or after the timeout.
    pub fn update_dying(&mut self, gravity: f32, dt: f32) {
        if self.death_finished {
            return;
        }
        self.death_elapsed += dt;
        physics::apply_gravity(&mut self.body, gravity * game::DEATH_GRAVITY_SCALE, dt);
        physics::clamp_velocity(&mut self.body, game::MAX_FALL_SPEED * game::DEATH_GRAVITY_SCALE);
        self.body.y += self.body.velocity * dt;
        self.body.y = self.body.y.clamp(0.0, game::VIEW_HEIGHT - game::BIRD_HEIGHT);

        self.rotation += (PI - self.rotation) * game::DEATH_ROTATION_SMOOTHING;
        self.wing_phase = 0.0;

        let on_floor = self.body.y + game::BIRD_HEIGHT >= game::VIEW_HEIGHT;
        if on_floor || self.death_elapsed > game::DEATH_TIMEOUT {
            self.body.y = game::VIEW_HEIGHT - game::BIRD_HEIGHT;
            self.death_finished = true;
        }
    }

    /// Idempotent. Forces a visible downward plunge even when the bird was
    /// moving up at the moment of death.
    pub fn start_death_animation(&mut self) {
        if self.dying {
            return;
        }
        self.dying = true;
        self.death_elapsed = 0.0;
        if self.body.velocity < game::DEATH_PLUNGE_SPEED {
            self.body.velocity = game::DEATH_PLUNGE_SPEED;
        }
    }

    pub fn rect(&self) -> RectF {
        RectF::new(self.x, self.body.y, game::BIRD_WIDTH, game::BIRD_HEIGHT)
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.body.y
    }

    pub fn velocity(&self) -> f32 {
        self.body.velocity
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn wing_phase(&self) -> f32 {
        self.wing_phase
    }

    /// Which sprite frame the wings are on.
    pub fn wing_frame(&self) -> usize {
        if self.wing_phase.sin() >= 0.0 {
            0
        } else {
            1
        }
    }

    pub fn is_dying(&self) -> bool {
        self.dying
    }

    pub fn death_elapsed(&self) -> f32 {
        self.death_elapsed
    }

    pub fn death_finished(&self) -> bool {
        self.death_finished
    }
}
