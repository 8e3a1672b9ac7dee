use std::sync::atomic::{AtomicU8, Ordering};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::ui::styles;

/// Spinner frame counter, advanced once per rendered frame
#[derive(Debug, Default)]
pub struct Loading {
    index: AtomicU8,
}

#[derive(Copy, Clone, Debug, Default)]
pub struct LoadingWidget {
    index: u8,
}

impl From<&Loading> for LoadingWidget {
    fn from(loading: &Loading) -> Self {
        Self {
            index: loading.index.fetch_add(1, Ordering::Acquire),
        }
    }
}

impl Widget for LoadingWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (glyph, dots) = match self.index % 6 {
            1 => ("◰", ".  "),
            2 => ("◳", ".. "),
            3 => ("◲", "..."),
            4 => ("◲", " .."),
            5 => ("◱", "  ."),
            _ => ("◰", "   "),
        };
        let label = t!("TokenDetail.Loading");
        let width = u16::try_from(label.width() + 6).unwrap_or(u16::MAX);
        let line = Line::from(vec![
            Span::styled(format!("{glyph} "), styles::gray()),
            Span::styled(label, styles::gray()),
            Span::styled(dots, styles::gray()),
        ]);
        let area = crate::ui::rect::centered(width, 1, area);
        Paragraph::new(line).render(area, buf);
    }
}
