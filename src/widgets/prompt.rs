use crossterm::event::KeyEvent;
use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tui_input::backend::crossterm::EventHandler;

use crate::data::TokenId;
use crate::ui::styles;

const WIDTH: u16 = 40;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptOutcome {
    Editing,
    Cancelled,
    Submitted(TokenId),
}

/// One-line identifier input
#[derive(Debug, Default)]
pub struct Prompt {
    input: tui_input::Input,
    visible: bool,
}

impl Prompt {
    pub fn open(&mut self) {
        self.input.reset();
        self.visible = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn handle_key(&mut self, event: KeyEvent) -> PromptOutcome {
        match event {
            key!(Esc) => {
                self.visible = false;
                PromptOutcome::Cancelled
            }
            key!(Enter) => {
                self.visible = false;
                let value = self.input.value().trim().to_string();
                self.input.reset();
                if value.is_empty() {
                    PromptOutcome::Cancelled
                } else {
                    PromptOutcome::Submitted(TokenId::from(value))
                }
            }
            _ => {
                let evt = crossterm::event::Event::Key(event);
                _ = self.input.handle_event(&evt);
                PromptOutcome::Editing
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect) {
        if !self.visible {
            return;
        }
        let area = crate::ui::rect::centered(WIDTH, 3, rect);
        let inner_width = area.width.saturating_sub(2) as usize;
        let scroll = self.input.visual_scroll(inner_width);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles::border())
            .title(Span::styled(t!("Prompt.Title"), styles::text()));
        let paragraph = Paragraph::new(self.value())
            .style(styles::text())
            .scroll((0, u16::try_from(scroll).unwrap_or(0)))
            .block(block);

        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);

        let cursor = self.input.visual_cursor().saturating_sub(scroll);
        frame.set_cursor(
            area.x + 1 + u16::try_from(cursor).unwrap_or(0),
            area.y + 1,
        );
    }
}
