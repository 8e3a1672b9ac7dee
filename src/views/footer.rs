use ratatui::{
    prelude::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::data::TokenId;
use crate::ui::styles;
use crate::views::DetailState;

pub fn render(frame: &mut Frame, rect: Rect, identifier: Option<&TokenId>, state: &DetailState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(rect);

    let dark_gray = styles::dark_gray();
    let keys = Paragraph::new(Line::from(vec![
        Span::styled(t!("Keyboard.Back"), dark_gray),
        Span::styled("  ", dark_gray),
        Span::styled(t!("Keyboard.Token"), dark_gray),
        Span::styled("  ", dark_gray),
        Span::styled(t!("Keyboard.Quit"), dark_gray),
    ]));
    frame.render_widget(keys, chunks[0]);

    let (status, status_style) = match state {
        DetailState::Resolving => ("···", styles::text()),
        DetailState::Ready(_) => ("■■■", styles::favorable_unfavorable().0),
        DetailState::Failed(_) => ("□□□", styles::error()),
    };
    let id = identifier.map(ToString::to_string).unwrap_or_default();
    let status = Paragraph::new(Line::from(vec![
        Span::styled(format!("#{id} "), dark_gray),
        Span::styled(status, status_style),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(status, chunks[1]);
}
