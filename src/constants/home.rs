pub const CLOUD_SPEED: f32 = 4.0;
pub const CLOUD_DENSITY: f32 = 0.04;

pub const TITLE_TEXT: &str = r#"
   ______ __                           ____  _          __
  / ____// /____ _ ____   ____   __  _/ __ )(_)_______ / /
 / /_   / // __ `// __ \ / __ \ / / / / __  / // ___/ / /
/ __/  / // /_/ // /_/ // /_/ // /_/ / /_/ / // /  / /_/
/_/    /_/ \__,_// .___// .___/ \__, /_____/_//_/  (_)
                /_/    /_/     /____/
"#;
