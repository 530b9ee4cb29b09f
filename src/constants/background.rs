pub const GROUND_HEIGHT: u16 = 3;

pub const CLOUD_CHARS: [char; 3] = ['~', '-', '.'];
