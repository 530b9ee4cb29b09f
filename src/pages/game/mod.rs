//! The game page: the per-frame orchestrator driving the whole simulation.
//!
//! One `Tick` action advances the world by one clamped frame delta; `Render`
//! draws whatever state is current. All mutable simulation state lives here
//! and is touched only inside `step`.

mod ability;
mod bird;
mod collision;
mod difficulty;
mod physics;
mod pipes;

use std::{collections::HashMap, time::Instant};

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use rand::rngs::ThreadRng;
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc::UnboundedSender;

use super::{Page, PageId};
use crate::{
    action::{act, Action, ActionState, Command, GameAction},
    components::multiline::MultiLine,
    config::{key_event_to_string, PageKeyBindings},
    constants::game,
    pages::game::{
        ability::Ability, bird::Bird, collision::check_collision, difficulty::Difficulty,
        pipes::PipeField,
    },
    storage::Storage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Playing,
    GameOver,
}

pub struct GamePage {
    pub action_tx: Option<UnboundedSender<Action>>,
    pub keymap: PageKeyBindings,
    state: State,
    canvas: Rect,
    bird: Bird,
    pipes: PipeField,
    difficulty: Difficulty,
    ability: Ability,
    rng: ThreadRng,
    score: u32,
    storage: Storage,
    ability_key: String,
    jump_requested: bool,
    last_time: Instant,
    notification: Option<(&'static str, f32)>,
    hud_warned: bool,
}

impl GamePage {
    pub fn new() -> Self {
        GamePage {
            action_tx: None,
            keymap: PageKeyBindings::default(),
            state: State::Start,
            canvas: Rect::new(0, 0, 0, 0),
            bird: Bird::new(),
            pipes: PipeField::new(),
            difficulty: Difficulty::new(),
            ability: Ability::new(game::ABILITY_DURATION, game::ABILITY_COOLDOWN),
            rng: rand::thread_rng(),
            score: 0,
            storage: Storage::default(),
            ability_key: game::DEFAULT_ABILITY_KEY.to_string(),
            jump_requested: false,
            last_time: Instant::now(),
            notification: None,
            hud_warned: false,
        }
    }

    /// Full reset into a fresh round. Used for both start -> playing and
    /// game-over -> playing.
    fn start_round(&mut self) {
        self.score = 0;
        self.pipes.reset();
        self.difficulty.reset();
        self.ability.reset();
        self.bird.reset();
        self.jump_requested = false;
        self.notification = None;
        self.last_time = Instant::now();
        self.state = State::Playing;
        log::info!("round started");
    }

    /// Idempotent playing -> game-over transition.
    fn game_over(&mut self) {
        if self.state == State::GameOver {
            return;
        }
        self.bird.start_death_animation();
        self.state = State::GameOver;
        log::info!("game over, score {}", self.score);
        if self.score > self.storage.high_score() {
            self.storage.set_high_score(self.score);
            if let Err(e) = self.storage.save() {
                log::warn!("failed to persist high score: {e}");
            }
        }
    }

    /// One simulation step. Only ever called while playing.
    fn step(&mut self, dt: f32) {
        // Consume-once jump handshake: at most one impulse per frame
        let jump = std::mem::take(&mut self.jump_requested);

        self.ability.tick(dt);

        let floor_hit = self.bird.update_live(jump, self.difficulty.gravity(), dt);

        self.pipes.advance(self.difficulty.pipe_speed(), dt);
        self.pipes.prune();
        self.pipes.try_spawn(
            dt,
            self.difficulty.pipe_gap(),
            self.difficulty.spawn_interval(),
            &mut self.rng,
        );

        if floor_hit {
            self.game_over();
        } else if !self.ability.is_active() {
            let bird_rect = self.bird.rect();
            let hit = self.pipes.iter().any(|obstacle| check_collision(&bird_rect, &obstacle.rect()));
            if hit {
                self.game_over();
            }
        }
        if self.state != State::Playing {
            return;
        }

        self.score += self.pipes.score_passed(self.bird.x());
        if let Some(message) = self.difficulty.observe_score(self.score) {
            self.notification = Some((message, game::NOTIFICATION_SECS));
        }
    }

    fn on_tick(&mut self) {
        let dt = self.last_time.elapsed().as_secs_f32().clamp(0.0, game::MAX_FRAME_DELTA);
        self.last_time = Instant::now();

        match self.state {
            State::Start => {},
            State::Playing => self.step(dt),
            // The simulation is frozen, but the death animation keeps playing
            // until it reaches the floor or times out.
            State::GameOver => {
                if self.bird.is_dying() && !self.bird.death_finished() {
                    self.bird.update_dying(self.difficulty.gravity(), dt);
                }
            },
        }

        if let Some((message, remaining)) = self.notification {
            let remaining = remaining - dt;
            self.notification = if remaining > 0.0 { Some((message, remaining)) } else { None };
        }
    }

    // Virtual-viewport units -> terminal cells within the canvas.
    fn to_cells(&self, x: f32, y: f32, width: f32, height: f32) -> Rect {
        let sx = self.canvas.width as f32 / game::VIEW_WIDTH;
        let sy = self.canvas.height as f32 / game::VIEW_HEIGHT;

        let left = (x * sx).floor().clamp(0.0, self.canvas.width as f32) as u16;
        let top = (y * sy).floor().clamp(0.0, self.canvas.height as f32) as u16;
        let right = ((x + width) * sx).ceil().clamp(0.0, self.canvas.width as f32) as u16;
        let bottom = ((y + height) * sy).ceil().clamp(0.0, self.canvas.height as f32) as u16;

        Rect {
            x: self.canvas.x + left,
            y: self.canvas.y + top,
            width: right.saturating_sub(left),
            height: bottom.saturating_sub(top),
        }
    }

    fn draw_pipes(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        for obstacle in self.pipes.iter() {
            let rect = obstacle.rect();
            let cells = self.to_cells(rect.x, rect.y, rect.width, rect.height);
            if cells.width == 0 || cells.height == 0 {
                continue;
            }
            let cells = cells.intersection(area);
            let row = std::iter::repeat_n('█', cells.width as usize).collect::<String>();
            let rows = std::iter::repeat_with(|| row.clone()).take(cells.height as usize).collect();
            let mut pipe = MultiLine::new(rows);
            if let Some(color) = game::PIPE_COLOR {
                pipe = pipe.style(Style::default().fg(color));
            }
            f.render_widget(pipe, cells);
        }
    }

    fn draw_bird(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let (text, color) = if self.bird.is_dying() {
            (game::BIRD_DYING_TEXT, game::BIRD_DYING_COLOR)
        } else if self.ability.is_active() {
            (game::BIRD_TEXTS[self.bird.wing_frame()], game::BIRD_SHIELD_COLOR)
        } else {
            (game::BIRD_TEXTS[self.bird.wing_frame()], game::BIRD_COLOR)
        };
        let lines: Vec<String> =
            text.lines().filter(|line| !line.is_empty()).map(|line| line.to_string()).collect();
        let height = lines.len() as u16;
        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0) as u16;

        let anchor = self.to_cells(self.bird.x(), self.bird.y(), game::BIRD_WIDTH, game::BIRD_HEIGHT);
        let cells = Rect { x: anchor.x, y: anchor.y, width, height }.intersection(area);
        if cells.width == 0 || cells.height == 0 {
            return;
        }
        f.render_widget(
            MultiLine::new(lines).ignore_whitespace(true).style(Style::default().fg(color)),
            cells,
        );
    }

    fn draw_hud(&mut self, f: &mut ratatui::Frame<'_>, area: Rect) {
        if area.height < 2 || area.width < 30 {
            if !self.hud_warned {
                log::warn!("play area too small for the HUD, skipping it");
                self.hud_warned = true;
            }
            return;
        }

        let shield = if self.ability.is_active() {
            format!("SHIELD {:.1}s", self.ability.active_remaining())
        } else if !self.ability.is_ready() {
            format!("shield in {:.1}s", self.ability.cooldown_remaining())
        } else {
            format!("shield ready [{}]", self.ability_key)
        };
        let line = Line::from(vec![
            Span::styled(format!(" Score {} ", self.score), Style::default().fg(Color::White)),
            Span::styled(format!(" Best {} ", self.storage.high_score()), Style::default().fg(Color::Gray)),
            Span::styled(format!(" Level {} ", self.difficulty.level()), Style::default().fg(Color::Gray)),
            Span::styled(format!(" {} ", shield), Style::default().fg(game::BIRD_SHIELD_COLOR)),
        ]);
        f.render_widget(Paragraph::new(line), Rect { height: 1, ..area });
    }

    fn draw_banner(&self, f: &mut ratatui::Frame<'_>, area: Rect, text: &str, color: Color) {
        let width = (text.chars().count() as u16).min(area.width);
        let [_, banner_area, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, banner_area, _] = Layout::vertical([
            Constraint::Length(area.height / 3),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(banner_area);
        f.render_widget(
            Paragraph::new(text).style(Style::default().fg(color)).alignment(Alignment::Center),
            banner_area,
        );
    }
}

impl Page for GamePage {
    fn id(&self) -> PageId {
        PageId::Game
    }

    fn register_keymap(&mut self, keymaps: &HashMap<PageId, PageKeyBindings>) -> Result<()> {
        if let Some(keymap) = keymaps.get(&self.id()) {
            self.keymap = keymap.clone();
        }
        Ok(())
    }

    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(tx);
        Ok(())
    }

    fn init(&mut self) -> Result<()> {
        self.storage = Storage::load();
        self.ability_key = self.storage.ability_key().to_string();
        Ok(())
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        // The ability trigger is a user-rebindable raw key, compared by its
        // string form against the persisted binding.
        if key_event_to_string(&key) == self.ability_key {
            return Ok(Some(act!(Command::Game(GameAction::Ability))));
        }
        Ok(None)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action.command {
            Command::StartGame => {
                self.state = State::Start;
                self.last_time = Instant::now();
            },
            Command::Tick => self.on_tick(),
            Command::Game(command) => match command {
                GameAction::Flap => match self.state {
                    State::Start => self.start_round(),
                    State::Playing => self.jump_requested = true,
                    State::GameOver => {},
                },
                GameAction::Ability => {
                    if self.state == State::Playing && !self.ability.activate() {
                        log::debug!("ability still cooling down");
                    }
                },
                GameAction::Restart => {
                    if self.state != State::Playing {
                        self.start_round();
                    }
                },
            },
            _ => {},
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut ratatui::Frame<'_>, area: Rect) -> Result<()> {
        self.canvas = area;

        match self.state {
            State::Start => {
                self.draw_banner(f, area, "Press Space to flap. Good luck!", Color::White);
            },
            State::Playing | State::GameOver => {
                self.draw_pipes(f, area);
                self.draw_bird(f, area);
                self.draw_hud(f, area);

                if let Some((message, _)) = self.notification {
                    self.draw_banner(f, area, message, Color::Yellow);
                }
                if self.state == State::GameOver && self.bird.death_finished() {
                    let text = format!(
                        "Game over! Score {} (best {}). Press R to retry.",
                        self.score,
                        self.storage.high_score()
                    );
                    self.draw_banner(f, area, &text, game::BIRD_DYING_COLOR);
                }
            },
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn playing_page() -> GamePage {
        let mut page = GamePage::new();
        page.start_round();
        page
    }

    #[test]
    fn test_round_reset_clears_everything() {
        let mut page = playing_page();
        page.score = 60;
        page.jump_requested = true;
        page.ability.activate();
        page.difficulty.observe_score(60);
        page.start_round();

        assert_eq!(page.score, 0);
        assert_eq!(page.difficulty.level(), 0);
        assert!(!page.jump_requested);
        assert!(page.ability.is_ready());
        assert_eq!(page.pipes.iter().count(), 0);
        assert_eq!(page.state, State::Playing);
    }

    #[test]
    fn test_jump_consumed_once() {
        let mut page = playing_page();
        page.jump_requested = true;
        page.step(0.016);
        assert!(!page.jump_requested);
        assert_eq!(page.bird.velocity(), -game::JUMP_FORCE + page.difficulty.gravity() * 0.016);
    }

    #[test]
    fn test_floor_hit_triggers_game_over_once() {
        let mut page = playing_page();
        for _ in 0..400 {
            page.step(0.05);
            if page.state == State::GameOver {
                break;
            }
        }
        assert_eq!(page.state, State::GameOver);
        assert!(page.bird.is_dying());

        // Re-entering game over is a no-op
        let elapsed = page.bird.death_elapsed();
        page.game_over();
        assert_eq!(page.bird.death_elapsed(), elapsed);
    }

    #[test]
    fn test_simulation_freezes_after_game_over() {
        let mut page = playing_page();
        page.game_over();
        let score = page.score;
        page.on_tick();
        assert_eq!(page.score, score);
        assert_eq!(page.pipes.iter().count(), 0);
    }

    #[test]
    fn test_death_animation_runs_after_game_over() {
        let mut page = playing_page();
        page.game_over();
        page.last_time = Instant::now();
        let y = page.bird.y();
        // Ticks are wall-clock driven; drive the bird directly with the same
        // gating the tick handler applies.
        assert!(page.bird.is_dying() && !page.bird.death_finished());
        page.bird.update_dying(page.difficulty.gravity(), 0.05);
        assert!(page.bird.y() > y);
    }

    #[test]
    fn test_pipe_collision_ends_the_round() {
        let mut page = playing_page();
        // Gap at the very bottom, so the top segment covers the bird's row;
        // slide the pair onto the bird's column
        page.pipes.spawn_pair_at(game::MIN_PIPE_GAP, game::VIEW_HEIGHT - game::MIN_PIPE_GAP - game::GAP_MARGIN);
        page.pipes.advance(game::VIEW_WIDTH - 60.0, 1.0);
        page.step(0.016);
        assert_eq!(page.state, State::GameOver);
        assert!(page.bird.is_dying());
    }

    #[test]
    fn test_shield_suppresses_pipe_collisions() {
        let mut page = playing_page();
        page.ability.activate();
        // A pair whose gap sits at the very bottom, so the top segment covers
        // the bird; slide it onto the bird's column
        page.pipes.spawn_pair_at(game::MIN_PIPE_GAP, game::VIEW_HEIGHT - game::MIN_PIPE_GAP - game::GAP_MARGIN);
        page.pipes.advance(game::VIEW_WIDTH - 60.0, 1.0);
        page.step(0.016);
        assert_eq!(page.state, State::Playing);

        // The same situation without the shield is fatal
        page.ability.reset();
        page.step(0.016);
        assert_eq!(page.state, State::GameOver);
    }

    #[test]
    fn test_level_up_sets_notification() {
        let mut page = playing_page();
        page.score = game::SCORE_PER_LEVEL - 1;
        // A passed pair right behind the bird
        page.pipes.spawn_pair(150.0, &mut rand::thread_rng());
        page.pipes.advance(game::VIEW_WIDTH + game::PIPE_WIDTH, 1.0);
        page.pipes.prune();
        page.pipes.spawn_pair(150.0, &mut rand::thread_rng());
        page.pipes.advance(game::VIEW_WIDTH - 20.0, 1.0);
        page.step(0.016);
        assert_eq!(page.score, game::SCORE_PER_LEVEL);
        assert_eq!(page.difficulty.level(), 1);
        assert!(page.notification.is_some());
    }

    #[test]
    fn test_high_score_recorded_on_game_over() {
        let mut page = playing_page();
        page.storage.set_high_score(3);
        page.score = 10;
        page.game_over();
        assert_eq!(page.storage.high_score(), 10);
    }
}
