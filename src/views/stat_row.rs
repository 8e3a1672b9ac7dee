use std::borrow::Cow;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::ui::styles;

/// Trailing affordance glyph of every row
pub const CHEVRON: &str = "›";

/// Height of one row: the text line plus its bottom rule
pub const HEIGHT: u16 = 2;

/// Label on the left, value and a chevron on the right
#[derive(Clone, Debug)]
pub struct StatRow<'a> {
    label: Cow<'a, str>,
    value: Cow<'a, str>,
}

impl<'a> StatRow<'a> {
    pub fn new(label: impl Into<Cow<'a, str>>, value: impl Into<Cow<'a, str>>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl Widget for StatRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(styles::border());
        let inner = block.inner(area);
        block.render(area, buf);

        let value_width = self.value.width() + 1 + CHEVRON.width();
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(u16::try_from(value_width).unwrap_or(u16::MAX)),
            ])
            .split(inner);

        Paragraph::new(Span::styled(self.label, styles::label())).render(chunks[0], buf);
        Paragraph::new(Line::from(vec![
            Span::styled(self.value, styles::text()),
            Span::raw(" "),
            Span::styled(CHEVRON, styles::dark_gray()),
        ]))
        .alignment(Alignment::Right)
        .render(chunks[1], buf);
    }
}
