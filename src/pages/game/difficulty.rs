//! Score-driven difficulty scaling. The level is a step function of the
//! score; every step recomputes the live tunables from fixed base values.

use crate::constants::game;

#[derive(Debug)]
pub struct Difficulty {
    level: u32,
    pipe_speed: f32,
    pipe_gap: f32,
    gravity: f32,
    spawn_interval: f32,
}

impl Difficulty {
    pub fn new() -> Self {
        let mut difficulty = Difficulty {
            level: 0,
            pipe_speed: game::BASE_PIPE_SPEED,
            pipe_gap: game::BASE_PIPE_GAP,
            gravity: game::BASE_GRAVITY,
            spawn_interval: game::BASE_SPAWN_INTERVAL,
        };
        difficulty.recompute();
        difficulty
    }

    pub fn reset(&mut self) {
        self.level = 0;
        self.recompute();
    }

    /// Derives the level from the score and returns the banner message when
    /// the level just went up. The level never decreases.
    pub fn observe_score(&mut self, score: u32) -> Option<&'static str> {
        let level = score / game::SCORE_PER_LEVEL;
        if level <= self.level {
            return None;
        }
        self.level = level;
        self.recompute();
        log::info!("difficulty level up: {}", self.level);

        let index = (self.level as usize - 1).min(game::LEVEL_MESSAGES.len() - 1);
        Some(game::LEVEL_MESSAGES[index])
    }

    fn recompute(&mut self) {
        let level = self.level as f32;
        self.pipe_speed = game::BASE_PIPE_SPEED + level * game::SPEED_PER_LEVEL;
        self.pipe_gap = (game::BASE_PIPE_GAP - level * game::GAP_PER_LEVEL).max(game::MIN_PIPE_GAP);
        self.gravity = game::BASE_GRAVITY + level * game::GRAVITY_PER_LEVEL;
        self.spawn_interval =
            (game::BASE_SPAWN_INTERVAL - level * game::INTERVAL_PER_LEVEL).max(game::MIN_SPAWN_INTERVAL);
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn pipe_speed(&self) -> f32 {
        self.pipe_speed
    }

    pub fn pipe_gap(&self) -> f32 {
        self.pipe_gap
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn spawn_interval(&self) -> f32 {
        self.spawn_interval
    }
}
