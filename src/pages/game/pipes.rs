//! The obstacle field: spawn timing, horizontal scroll, off-screen pruning
//! and pass-through scoring.
//!
//! Obstacles live in one ordered list, appended in pairs (top segment then
//! bottom segment at the same x). Spawn order is left-to-right on screen.

use rand::Rng;

use super::collision::RectF;
use crate::constants::game;

#[derive(Debug, Clone)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub height: f32,
    pub passed: bool,
}

impl Obstacle {
    pub fn rect(&self) -> RectF {
        RectF::new(self.x, self.y, game::PIPE_WIDTH, self.height)
    }
}

#[derive(Debug)]
pub struct PipeField {
    obstacles: Vec<Obstacle>,
    spawn_timer: f32,
}

impl PipeField {
    pub fn new() -> Self {
        PipeField { obstacles: Vec::new(), spawn_timer: 0.0 }
    }

    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.spawn_timer = 0.0;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn advance(&mut self, pipe_speed: f32, dt: f32) {
        for obstacle in self.obstacles.iter_mut() {
            obstacle.x -= pipe_speed * dt;
        }
    }

    /// Drops segments well past either screen edge. The margin keeps pipes
    /// from popping in or out at the visible boundary.
    pub fn prune(&mut self) {
        self.obstacles.retain(|obstacle| {
            obstacle.x + game::PIPE_WIDTH >= -game::PRUNE_MARGIN
                && obstacle.x <= game::VIEW_WIDTH + game::PRUNE_MARGIN
        });
    }

    /// Accumulates the spawn timer; emits one pair at the right boundary when
    /// the interval elapses.
    pub fn try_spawn<R: Rng>(&mut self, dt: f32, pipe_gap: f32, spawn_interval: f32, rng: &mut R) {
        self.spawn_timer += dt;
        if self.spawn_timer >= spawn_interval {
            self.spawn_pair(pipe_gap, rng);
            self.spawn_timer = 0.0;
        }
    }

    pub fn spawn_pair<R: Rng>(&mut self, pipe_gap: f32, rng: &mut R) {
        let max_gap_y = game::VIEW_HEIGHT - pipe_gap - game::GAP_MARGIN;
        let gap_y = rng.gen_range(game::GAP_MARGIN..=max_gap_y);
        self.spawn_pair_at(pipe_gap, gap_y);
    }

    pub(crate) fn spawn_pair_at(&mut self, pipe_gap: f32, gap_y: f32) {
        let x = game::VIEW_WIDTH;
        self.obstacles.push(Obstacle { x, y: 0.0, height: gap_y, passed: false });
        self.obstacles.push(Obstacle {
            x,
            y: gap_y + pipe_gap,
            height: game::VIEW_HEIGHT - gap_y - pipe_gap,
            passed: false,
        });
    }

    /// Marks segments whose trailing edge has crossed the bird and returns the
    /// points earned. A point is awarded once per pair, when the second
    /// segment of a pair completes; pairs are recognized by x positions
    /// within a small epsilon.
    pub fn score_passed(&mut self, bird_x: f32) -> u32 {
        let mut points = 0;
        for index in 0..self.obstacles.len() {
            let obstacle = &self.obstacles[index];
            if obstacle.passed || obstacle.x + game::PIPE_WIDTH >= bird_x {
                continue;
            }
            let x = obstacle.x;
            let partner_passed = self.obstacles.iter().enumerate().any(|(other, candidate)| {
                other != index && candidate.passed && (candidate.x - x).abs() < game::PAIR_EPSILON
            });
            self.obstacles[index].passed = true;
            if partner_passed {
                points += 1;
            }
        }
        points
    }

    #[cfg(test)]
    fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_pair_fills_play_height_exactly() {
        let mut field = PipeField::new();
        let mut rng = rng();
        for _ in 0..50 {
            field.reset();
            field.spawn_pair(150.0, &mut rng);
            let obstacles = field.obstacles();
            assert_eq!(obstacles.len(), 2);
            let (top, bottom) = (&obstacles[0], &obstacles[1]);
            assert_eq!(top.y, 0.0);
            assert_eq!(top.height + 150.0 + bottom.height, game::VIEW_HEIGHT);
            assert_eq!(bottom.y, top.height + 150.0);
            assert_eq!(top.x, game::VIEW_WIDTH);
            assert_eq!(bottom.x, game::VIEW_WIDTH);
        }
    }

    #[test]
    fn test_gap_offset_stays_in_margins() {
        let mut field = PipeField::new();
        let mut rng = rng();
        for _ in 0..200 {
            field.reset();
            field.spawn_pair(150.0, &mut rng);
            let gap_y = field.obstacles()[0].height;
            assert!(gap_y >= game::GAP_MARGIN);
            assert!(gap_y <= game::VIEW_HEIGHT - 150.0 - game::GAP_MARGIN);
        }
    }

    #[test]
    fn test_known_gap_split() {
        let mut field = PipeField::new();
        field.spawn_pair_at(150.0, 200.0);
        let obstacles = field.obstacles();
        assert_eq!(obstacles[0].height, 200.0);
        assert_eq!(obstacles[1].y, 350.0);
        assert_eq!(obstacles[1].height, 250.0);
    }

    #[test]
    fn test_spawn_timer_accumulates() {
        let mut field = PipeField::new();
        let mut rng = rng();
        field.try_spawn(0.5, 150.0, 1.6, &mut rng);
        field.try_spawn(0.5, 150.0, 1.6, &mut rng);
        field.try_spawn(0.5, 150.0, 1.6, &mut rng);
        assert!(field.obstacles().is_empty());
        field.try_spawn(0.5, 150.0, 1.6, &mut rng);
        assert_eq!(field.obstacles().len(), 2);
        // Timer reset: the next small delta must not spawn again
        field.try_spawn(0.5, 150.0, 1.6, &mut rng);
        assert_eq!(field.obstacles().len(), 2);
    }

    #[test]
    fn test_advance_moves_left() {
        let mut field = PipeField::new();
        field.spawn_pair_at(150.0, 200.0);
        field.advance(150.0, 0.1);
        for obstacle in field.iter() {
            assert_eq!(obstacle.x, game::VIEW_WIDTH - 15.0);
        }
    }

    #[test]
    fn test_prune_drops_far_offscreen_only() {
        let mut field = PipeField::new();
        field.spawn_pair_at(150.0, 200.0);
        // Just past the left edge: kept (within the 50-unit margin)
        for obstacle in field.obstacles.iter_mut() {
            obstacle.x = -game::PIPE_WIDTH - 49.0;
        }
        field.prune();
        assert_eq!(field.obstacles().len(), 2);
        // Fully past the margin: dropped
        for obstacle in field.obstacles.iter_mut() {
            obstacle.x = -game::PIPE_WIDTH - 51.0;
        }
        field.prune();
        assert!(field.obstacles().is_empty());
    }

    #[test]
    fn test_score_one_point_per_pair() {
        let mut field = PipeField::new();
        field.spawn_pair_at(150.0, 200.0);
        // Move the pair to just behind the bird
        for obstacle in field.obstacles.iter_mut() {
            obstacle.x = game::BIRD_X - game::PIPE_WIDTH - 1.0;
        }
        let points = field.score_passed(game::BIRD_X);
        assert_eq!(points, 1);
        assert!(field.iter().all(|obstacle| obstacle.passed));
        // Re-scoring the same pair yields nothing
        assert_eq!(field.score_passed(game::BIRD_X), 0);
    }

    #[test]
    fn test_unpassed_pair_scores_nothing() {
        let mut field = PipeField::new();
        field.spawn_pair_at(150.0, 200.0);
        assert_eq!(field.score_passed(game::BIRD_X), 0);
        assert!(field.iter().all(|obstacle| !obstacle.passed));
    }

    #[test]
    fn test_two_pairs_score_independently() {
        let mut field = PipeField::new();
        field.spawn_pair_at(150.0, 200.0);
        field.spawn_pair_at(150.0, 120.0);
        // First pair behind the bird, second still ahead
        for obstacle in field.obstacles.iter_mut().take(2) {
            obstacle.x = 10.0 - game::PIPE_WIDTH;
        }
        assert_eq!(field.score_passed(game::BIRD_X), 1);
        // Second pair crosses later, at its own x
        for obstacle in field.obstacles.iter_mut().skip(2) {
            obstacle.x = 30.0 - game::PIPE_WIDTH;
        }
        assert_eq!(field.score_passed(game::BIRD_X), 1);
    }

    #[test]
    fn test_reset_clears_field_and_timer() {
        let mut field = PipeField::new();
        let mut rng = rng();
        field.try_spawn(1.5, 150.0, 1.6, &mut rng);
        field.spawn_pair(150.0, &mut rng);
        field.reset();
        assert!(field.obstacles().is_empty());
        // A fresh interval is required after reset
        field.try_spawn(0.2, 150.0, 1.6, &mut rng);
        assert!(field.obstacles().is_empty());
    }
}
