pub mod background;
pub mod game;
pub mod home;

/// Size of the bordered play window, in terminal cells.
pub const WIDTH: u16 = 100;
pub const HEIGHT: u16 = 32;
