use std::collections::HashMap;

use color_eyre::eyre::Result;
use derive_builder::Builder;
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc::UnboundedSender;

use super::{Page, PageId};
use crate::{
    action::{act, Action, ActionState, Command, HomeAction},
    config::PageKeyBindings,
    constants::home,
    storage::Storage,
};

#[derive(Copy, Clone, PartialEq, Eq)]
enum OptionItem {
    Start,
    Quit,
}

#[derive(Builder)]
pub struct HomePage {
    #[builder(default)]
    pub action_tx: Option<UnboundedSender<Action>>,
    #[builder(default)]
    pub keymap: PageKeyBindings,
    options: Vec<(OptionItem, &'static str)>,
    selected_option_index: usize,
    high_score: u32,
}

impl HomePage {
    pub fn new() -> Self {
        HomePageBuilder::default()
            .options(vec![(OptionItem::Start, "Start playing"), (OptionItem::Quit, "Quit")])
            .selected_option_index(0)
            .high_score(0)
            .build()
            .unwrap()
    }

    pub fn up(&mut self) {
        if self.selected_option_index > 0 {
            self.selected_option_index -= 1;
        }
    }

    pub fn down(&mut self) {
        if self.selected_option_index < self.options.len() - 1 {
            self.selected_option_index += 1;
        }
    }

    fn select(&self) -> Option<Action> {
        let (item, _) = self.options[self.selected_option_index];
        match item {
            OptionItem::Start => Some(act!(Command::StartGame)),
            OptionItem::Quit => Some(act!(Command::Quit)),
        }
    }
}

impl Page for HomePage {
    fn id(&self) -> PageId {
        PageId::Home
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
        self.high_score = Storage::load().high_score();
        Ok(())
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action.command {
            Command::Home(command) => match command {
                HomeAction::Up => self.up(),
                HomeAction::Down => self.down(),
                HomeAction::Select => return Ok(self.select()),
            },
            // A finished round may have raised the high score
            Command::BackHome => self.high_score = Storage::load().high_score(),
            _ => {},
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, rect: Rect) -> Result<()> {
        f.render_widget(Clear, rect);

        let title_lines: Vec<&str> = home::TITLE_TEXT.lines().filter(|s| !s.is_empty()).collect();
        let num_title_lines = title_lines.len() as u16;

        let num_options = self.options.len() as u16;
        let option_height = num_options * 2 - 1;

        let [title_area, score_area, option_area] = Layout::vertical(vec![
            Constraint::Length(num_title_lines),
            Constraint::Length(1),
            Constraint::Length(option_height),
        ])
        .flex(layout::Flex::SpaceAround)
        .areas(rect);

        // Draw title
        let lines = title_lines.iter().map(|line| Line::from(*line)).collect::<Vec<_>>();
        let paragraph = Paragraph::new(lines).style(Style::default().fg(Color::Yellow)).alignment(Alignment::Center);
        f.render_widget(paragraph, title_area);

        // Draw high score
        if self.high_score > 0 {
            let line = Line::from(format!("Best score: {}", self.high_score));
            let paragraph = Paragraph::new(line).style(Style::default().fg(Color::Gray)).alignment(Alignment::Center);
            f.render_widget(paragraph, score_area);
        }

        // Draw options
        let option_titles = self.options.iter().map(|(_, title)| *title).collect::<Vec<_>>();
        let max_option_len = option_titles.iter().map(|title| title.len()).max().unwrap_or(0) as u16;

        // Pad option titles so the selection highlight spans a uniform width
        let option_titles = option_titles
            .into_iter()
            .map(|title| {
                let pad_len = max_option_len as usize - title.len();
                format!("  {}{}", title, " ".repeat(pad_len + 2))
            })
            .collect::<Vec<_>>();

        let [option_area] = Layout::horizontal(vec![Constraint::Length(max_option_len + (2 * 2))])
            .flex(layout::Flex::SpaceAround)
            .areas(option_area);

        let lines = option_titles
            .iter()
            .enumerate()
            .flat_map(|(index, title)| {
                let line = Line::from(title.as_str()).style({
                    if index == self.selected_option_index {
                        Style::default().bg(Color::Cyan).fg(Color::Black)
                    } else {
                        Style::default()
                    }
                });
                [line, Line::from("")]
            })
            .collect::<Vec<_>>();

        let paragraph = Paragraph::new(lines).style(Style::default().fg(Color::White)).alignment(Alignment::Left);
        f.render_widget(paragraph, option_area);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_selection_moves_within_bounds() {
        let mut page = HomePage::new();
        assert_eq!(page.selected_option_index, 0);
        page.up();
        assert_eq!(page.selected_option_index, 0);
        page.down();
        assert_eq!(page.selected_option_index, 1);
        page.down();
        assert_eq!(page.selected_option_index, 1);
    }

    #[test]
    fn test_select_emits_page_switch() {
        let page = HomePage::new();
        let action = page.select().unwrap();
        assert_eq!(action.command, Command::StartGame);
    }

    #[test]
    fn test_select_quit() {
        let mut page = HomePage::new();
        page.down();
        let action = page.select().unwrap();
        assert_eq!(action.command, Command::Quit);
    }
}
