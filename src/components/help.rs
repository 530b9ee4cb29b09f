use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, BorderType, Borders, Clear, Padding, Row, Table, Widget},
};

use crate::{
    action::ActionState,
    config::{key_event_to_string, PageKeyBindings},
};

/// Centered keybinding overlay, one bordered table per binding group.
#[derive(Debug)]
pub struct Help {
    keybinding_groups: Vec<(String, Vec<(String, String)>)>,
    column_spacing: u16,
    margin_vertical: u16,
    margin_horizontal: u16,
}

impl Help {
    pub fn new(keybinding_groups: Vec<(String, PageKeyBindings)>) -> Self {
        let groups = keybinding_groups
            .into_iter()
            .map(|(group_name, keybindings)| {
                let mut keybindings: Vec<(String, String)> = keybindings
                    .0
                    .into_iter()
                    .filter(|(_, action)| action.state == ActionState::Start)
                    .map(|(event, action)| (key_event_to_string(&event), action.command.string()))
                    .collect();
                keybindings.sort_by_key(|(key, _)| key.clone());
                (group_name, keybindings)
            })
            .collect();

        Self { keybinding_groups: groups, column_spacing: 5, margin_vertical: 1, margin_horizontal: 2 }
    }

    fn render_group(
        &self,
        area: Rect,
        buf: &mut Buffer,
        group_name: &str,
        keybindings: &[(String, String)],
        key_length: u16,
        val_length: u16,
    ) {
        let rows: Vec<Row> = keybindings.iter().map(|(key, val)| Row::new(vec![key.clone(), val.clone()])).collect();

        let table = Table::new(rows, [Constraint::Length(key_length), Constraint::Min(val_length)])
            .column_spacing(self.column_spacing)
            .header(Row::new(vec!["Key", "Command"]).style(Style::new().bold()).bottom_margin(1))
            .block(
                Block::new()
                    .title(group_name.to_string())
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::new().bold().fg(Color::Cyan))
                    .padding(Padding::symmetric(self.margin_horizontal, self.margin_vertical)),
            );

        Clear::default().render(area, buf);
        table.render(area, buf);
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let key_length = self
            .keybinding_groups
            .iter()
            .flat_map(|(_, keybindings)| keybindings.iter().map(|(key, _)| key.len()))
            .max()
            .unwrap_or(0) as u16;
        let val_length = self
            .keybinding_groups
            .iter()
            .flat_map(|(_, keybindings)| keybindings.iter().map(|(_, val)| val.len()))
            .max()
            .unwrap_or(0) as u16;

        // column spacing + symmetric margins + border cells
        let width = key_length + val_length + self.column_spacing + (self.margin_horizontal * 2) + 2;
        let heights: Vec<Constraint> = self
            .keybinding_groups
            .iter()
            // rows + margins + header with its bottom margin + border cells
            .map(|(_, keybindings)| {
                Constraint::Length(keybindings.len() as u16 + (self.margin_vertical * 2) + 2 + 2)
            })
            .collect();

        let [area] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(area);
        let areas = Layout::vertical(heights).flex(Flex::Center).split(area);

        for (index, (group_name, keybindings)) in self.keybinding_groups.iter().enumerate() {
            self.render_group(areas[index], buf, group_name, keybindings, key_length, val_length);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, pages::PageId};

    #[test]
    fn test_new_help() {
        let config = Config::new().unwrap();
        let keybinding_groups = vec![
            ("System".to_string(), config.keybindings.global),
            ("Game".to_string(), config.keybindings.pages.get(&PageId::Game).unwrap().clone()),
        ];
        let help = Help::new(keybinding_groups);

        assert!(help.keybinding_groups.iter().any(|(name, _)| name == "Game"));
    }
}
