use std::time::SystemTime;

use rand::prelude::*;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Paragraph, StatefulWidget, Widget},
};

use crate::constants::background;

/// Sky full of clouds drifting to the left, plus a strip of ground at the
/// bottom. The cloud grid persists across frames so resizes only touch the
/// newly exposed cells.
#[derive(Debug)]
pub struct BackgroundState {
    speed: f32, // Cloud drift speed: columns per second
    density: f32,
    last_time: SystemTime,
    clouds: Vec<Vec<usize>>,
    width: usize,
    height: usize,
}

impl BackgroundState {
    pub fn new(speed: f32, density: f32) -> Self {
        Self {
            speed,
            density,
            last_time: SystemTime::now(),
            clouds: Vec::new(),
            width: 0,
            height: 0,
        }
    }

    fn update(&mut self, area: Rect) -> Vec<String> {
        let width = area.width as usize;
        let height = area.height as usize;

        let mut rng = thread_rng();
        let density = self.density;
        let blank = background::CLOUD_CHARS.len();
        let mut sample = |rng: &mut ThreadRng| {
            let u: f32 = rng.gen();
            if u > density {
                blank
            } else {
                rng.gen_range(0..blank)
            }
        };

        if width < self.width {
            for row in self.clouds.iter_mut() {
                row.truncate(width);
            }
        } else if width > self.width {
            let grow = width - self.width;
            for row in self.clouds.iter_mut() {
                row.extend(std::iter::repeat_with(|| sample(&mut rng)).take(grow));
            }
        }

        if height < self.height {
            self.clouds.truncate(height);
        } else {
            for _ in 0..(height - self.height) {
                let new_row =
                    std::iter::repeat_with(|| sample(&mut rng)).take(width).collect::<Vec<_>>();
                self.clouds.push(new_row);
            }
        }

        self.width = width;
        self.height = height;

        let now = SystemTime::now();
        let dt = now.duration_since(self.last_time).map(|d| d.as_secs_f32()).unwrap_or(0.0);

        if dt >= 1.0 / self.speed {
            self.last_time = now;

            // Drift one column to the left, feeding fresh samples in from the
            // right edge
            for row in self.clouds.iter_mut() {
                if !row.is_empty() {
                    row.remove(0);
                    row.push(sample(&mut rng));
                }
            }
        }

        self.clouds
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&index| {
                        if index == background::CLOUD_CHARS.len() {
                            ' '
                        } else {
                            background::CLOUD_CHARS[index]
                        }
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
    }

    pub fn get_empty_area(&self, area: Rect) -> Rect {
        let sky_height = area.height.saturating_sub(background::GROUND_HEIGHT);
        Rect { height: sky_height, ..area }
    }
}

#[derive(Debug, Default)]
pub struct Background;

impl Background {
    pub fn new() -> Self {
        Self::default()
    }

    fn render_ground(&self, area: Rect, buf: &mut Buffer) {
        let ground_string = std::iter::repeat_n('#', area.width as usize).collect::<String>();
        let ground_lines = std::iter::repeat_with(|| ground_string.clone())
            .map(|s| Line::from(s).style(Style::default().fg(Color::Green)))
            .take(area.height as usize)
            .collect::<Vec<_>>();

        Paragraph::new(ground_lines).render(area, buf);
    }

    fn render_clouds(&self, area: Rect, buf: &mut Buffer, state: &mut BackgroundState) {
        let lines = state.update(area).into_iter().map(Line::from).collect::<Vec<_>>();
        Paragraph::new(lines).style(Style::default().fg(Color::Gray)).render(area, buf);
    }
}

impl StatefulWidget for Background {
    type State = BackgroundState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut BackgroundState)
    where
        Self: Sized,
    {
        let [sky_area, ground_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(background::GROUND_HEIGHT)]).areas(area);

        self.render_clouds(sky_area, buf, state);
        self.render_ground(ground_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_area_excludes_ground() {
        let state = BackgroundState::new(4.0, 0.04);
        let area = Rect::new(0, 0, 80, 30);
        let empty = state.get_empty_area(area);
        assert_eq!(empty.height, 30 - background::GROUND_HEIGHT);
        assert_eq!(empty.width, 80);
    }

    #[test]
    fn test_grid_tracks_resizes() {
        let mut state = BackgroundState::new(4.0, 0.04);
        state.update(Rect::new(0, 0, 40, 10));
        assert_eq!(state.clouds.len(), 10);
        assert!(state.clouds.iter().all(|row| row.len() == 40));

        state.update(Rect::new(0, 0, 20, 5));
        assert_eq!(state.clouds.len(), 5);
        assert!(state.clouds.iter().all(|row| row.len() == 20));
    }
}
