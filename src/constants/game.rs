use ratatui::style::Color;

/// Logical simulation space. All physics, spawning and collision math is done
/// in these units and scaled to terminal cells at draw time.
pub const VIEW_WIDTH: f32 = 400.0;
pub const VIEW_HEIGHT: f32 = 600.0;

/// Largest frame delta fed into the simulation. Anything above this (a
/// suspended terminal, a debugger pause) is treated as a single 100ms step.
pub const MAX_FRAME_DELTA: f32 = 0.1;

// Bird
pub const BIRD_X: f32 = 80.0;
pub const BIRD_WIDTH: f32 = 24.0;
pub const BIRD_HEIGHT: f32 = 45.0;
pub const BIRD_START_Y: f32 = (VIEW_HEIGHT - BIRD_HEIGHT) / 2.0;
pub const JUMP_FORCE: f32 = 350.0;
pub const MAX_FALL_SPEED: f32 = 600.0;

// Rotation and wing animation
pub const ROTATION_SMOOTHING: f32 = 0.1;
pub const ROTATION_VELOCITY_SCALE: f32 = 0.002;
pub const WING_RATE_UP: f32 = 15.0;
pub const WING_RATE_DOWN: f32 = 8.0;

// Death animation
pub const DEATH_GRAVITY_SCALE: f32 = 1.5;
pub const DEATH_ROTATION_SMOOTHING: f32 = 0.15;
pub const DEATH_PLUNGE_SPEED: f32 = 200.0;
pub const DEATH_TIMEOUT: f32 = 2.0;

// Obstacles
pub const PIPE_WIDTH: f32 = 52.0;
pub const GAP_MARGIN: f32 = 100.0;
pub const PRUNE_MARGIN: f32 = 50.0;
pub const PAIR_EPSILON: f32 = 10.0;

// Difficulty
pub const BASE_GRAVITY: f32 = 1000.0;
pub const BASE_PIPE_SPEED: f32 = 150.0;
pub const BASE_PIPE_GAP: f32 = 160.0;
pub const BASE_SPAWN_INTERVAL: f32 = 1.6;
pub const SCORE_PER_LEVEL: u32 = 25;
pub const SPEED_PER_LEVEL: f32 = 30.0;
pub const GAP_PER_LEVEL: f32 = 10.0;
pub const GRAVITY_PER_LEVEL: f32 = 50.0;
pub const INTERVAL_PER_LEVEL: f32 = 0.1;
pub const MIN_PIPE_GAP: f32 = 100.0;
pub const MIN_SPAWN_INTERVAL: f32 = 0.8;

pub const LEVEL_MESSAGES: [&str; 5] = [
    "Level up! The pipes are closing in...",
    "Faster now! Keep those wings steady!",
    "The air grows heavy... gravity rises!",
    "Expert skies! Barely a gap to squeeze through!",
    "Maximum turbulence! Godspeed, little bird!",
];
pub const NOTIFICATION_SECS: f32 = 2.0;

// Ability (temporary invulnerability)
pub const ABILITY_DURATION: f32 = 3.0;
pub const ABILITY_COOLDOWN: f32 = 10.0;
pub const DEFAULT_ABILITY_KEY: &str = "s";

// Sprites: one text block per wing frame.
pub const BIRD_TEXTS: [&str; 2] = [
    r#"
 \ \
( o >
 \_/
"#,
    r#"
 /_/
( o >
 \_/
"#,
];
pub const BIRD_DYING_TEXT: &str = r#"
 ___
( x >
 \_/
"#;
pub const BIRD_COLOR: Color = Color::Yellow;
pub const BIRD_SHIELD_COLOR: Color = Color::LightCyan;
pub const BIRD_DYING_COLOR: Color = Color::LightRed;
pub const PIPE_COLOR: Option<Color> = Some(Color::LightGreen);
