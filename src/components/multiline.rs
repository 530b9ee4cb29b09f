use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

/// Renders a block of text lines cell by cell. With `ignore_whitespace` set,
/// whitespace cells are skipped entirely so sprites do not punch holes into
/// whatever is already drawn behind them.
#[derive(Debug)]
pub struct MultiLine<T: ToString> {
    lines: Vec<T>,
    line_padding: u16,
    ignore_whitespace: bool,
    style: Option<Style>,
}

impl<T: ToString> MultiLine<T> {
    pub fn new(lines: Vec<T>) -> Self {
        Self { lines, line_padding: 0, ignore_whitespace: false, style: None }
    }

    pub fn line_padding(self, line_padding: u16) -> Self {
        Self { line_padding, ..self }
    }

    pub fn ignore_whitespace(self, ignore_whitespace: bool) -> Self {
        Self { ignore_whitespace, ..self }
    }

    pub fn style(self, style: Style) -> Self {
        Self { style: Some(style), ..self }
    }
}

impl<T: ToString> Widget for MultiLine<T> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        for (row, line) in self.lines.iter().enumerate() {
            let y = area.y + (row as u16) * (1 + self.line_padding);
            if y >= area.bottom() {
                break;
            }
            for (col, c) in line.to_string().chars().enumerate() {
                let x = area.x + col as u16;
                if x >= area.right() {
                    break;
                }
                if self.ignore_whitespace && c.is_whitespace() {
                    continue;
                }
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(c);
                    if let Some(style) = self.style {
                        cell.set_style(style);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_lines_in_place() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 2));
        MultiLine::new(vec!["ab", "cd"]).render(Rect::new(1, 0, 4, 2), &mut buf);

        assert_eq!(buf.cell((1, 0)).unwrap().symbol(), "a");
        assert_eq!(buf.cell((2, 0)).unwrap().symbol(), "b");
        assert_eq!(buf.cell((1, 1)).unwrap().symbol(), "c");
    }

    #[test]
    fn test_ignore_whitespace_keeps_underlying_cells() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 5, 1));
        buf.cell_mut((1, 0)).unwrap().set_char('#');
        // The sprite's leading blank lands on the '#' cell and must not erase it
        MultiLine::new(vec![" x"]).ignore_whitespace(true).render(Rect::new(1, 0, 4, 1), &mut buf);

        assert_eq!(buf.cell((1, 0)).unwrap().symbol(), "#");
        assert_eq!(buf.cell((2, 0)).unwrap().symbol(), "x");
    }

    #[test]
    fn test_clips_to_area() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 1));
        MultiLine::new(vec!["abcdef", "ghi"]).render(Rect::new(0, 0, 3, 1), &mut buf);

        assert_eq!(buf.cell((2, 0)).unwrap().symbol(), "c");
    }
}
