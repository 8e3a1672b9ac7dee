use std::sync::Arc;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use tokio::sync::mpsc;

use crate::data::{ResolveError, TokenId, TokenRecord, TokenResolver};
use crate::helper::{format_currency, format_grouped, format_percent};
use crate::ui::{styles, Content};
use crate::widgets::{Loading, LoadingWidget};

use super::stat_row::{self, StatRow};

/// Back glyph drawn at the start of the header
pub const BACK: &str = "←";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailState {
    Resolving,
    Ready(Arc<TokenRecord>),
    Failed(ResolveError),
}

/// Identifies one resolution request; only the latest ticket may settle the view
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    pub generation: u64,
    pub id: TokenId,
}

/// Outcome of a background resolution, delivered back to the event loop
#[derive(Debug)]
pub struct Resolved {
    pub ticket: Ticket,
    pub result: Result<TokenRecord, ResolveError>,
}

/// Detail panel of a single token
pub struct TokenDetail {
    identifier: Option<TokenId>,
    generation: u64,
    state: DetailState,
    on_back: Box<dyn FnMut()>,
}

impl std::fmt::Debug for TokenDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDetail")
            .field("identifier", &self.identifier)
            .field("generation", &self.generation)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl TokenDetail {
    pub fn new(on_back: impl FnMut() + 'static) -> Self {
        Self {
            identifier: None,
            generation: 0,
            state: DetailState::Resolving,
            on_back: Box::new(on_back),
        }
    }

    pub fn identifier(&self) -> Option<&TokenId> {
        self.identifier.as_ref()
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// Point the panel at `id`.
    ///
    /// Returns the ticket to resolve with when the identifier changed; the previous
    /// record is dropped and any outstanding ticket becomes stale. Requesting the
    /// identifier already shown is a no-op.
    pub fn request(&mut self, id: TokenId) -> Option<Ticket> {
        if self.identifier.as_ref() == Some(&id) {
            return None;
        }
        self.generation += 1;
        self.identifier = Some(id.clone());
        self.state = DetailState::Resolving;
        tracing::debug!(%id, generation = self.generation, "开始解析代币");
        Some(Ticket {
            generation: self.generation,
            id,
        })
    }

    /// Apply a resolution result. Returns `false` if the ticket is stale and the
    /// result was discarded.
    pub fn settle(
        &mut self,
        ticket: &Ticket,
        result: Result<TokenRecord, ResolveError>,
    ) -> bool {
        if ticket.generation != self.generation || self.identifier.as_ref() != Some(&ticket.id) {
            tracing::debug!(
                id = %ticket.id,
                generation = ticket.generation,
                current = self.generation,
                "丢弃过期的解析结果"
            );
            return false;
        }

        self.state = match result {
            Ok(record) if record.id == ticket.id => {
                tracing::info!(id = %ticket.id, name = %record.name, "代币解析成功");
                DetailState::Ready(Arc::new(record))
            }
            Ok(record) => {
                tracing::warn!(requested = %ticket.id, returned = %record.id, "解析结果 ID 不匹配");
                DetailState::Failed(ResolveError::Transport(format!(
                    "requested {} but got {}",
                    ticket.id, record.id
                )))
            }
            Err(err) => {
                tracing::error!(id = %ticket.id, error = %err, "代币解析失败");
                DetailState::Failed(err)
            }
        };
        true
    }

    /// Invoke the back callback
    pub fn back(&mut self) {
        tracing::debug!(id = ?self.identifier, "返回");
        (self.on_back)();
    }

    pub fn widget<'a>(&'a self, loading: &Loading) -> TokenDetailWidget<'a> {
        TokenDetailWidget {
            state: &self.state,
            loading: LoadingWidget::from(loading),
        }
    }
}

/// Resolve `ticket` on the runtime and report back over `tx`
pub fn resolve_in_background(
    resolver: &Arc<dyn TokenResolver>,
    ticket: Ticket,
    tx: mpsc::UnboundedSender<Resolved>,
) {
    let fut = resolver.resolve(&ticket.id);
    tokio::spawn(async move {
        let result = fut.await;
        // the receiver is gone once the app is shutting down
        _ = tx.send(Resolved { ticket, result });
    });
}

pub struct TokenDetailWidget<'a> {
    state: &'a DetailState,
    loading: LoadingWidget,
}

impl Widget for TokenDetailWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.state {
            DetailState::Resolving => self.loading.render(area, buf),
            DetailState::Failed(_) => {
                Content::new(
                    Line::styled(t!("TokenDetail.Error"), styles::error()),
                    Line::styled(t!("TokenDetail.BackHint"), styles::gray()),
                )
                .render(area, buf);
            }
            DetailState::Ready(record) => ready(record, area, buf),
        }
    }
}

fn ready(record: &TokenRecord, area: Rect, buf: &mut Buffer) {
    let area = area.inner(&Margin {
        horizontal: 1,
        vertical: 0,
    });
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    header(record, chunks[0], buf);
    price(record, chunks[1], buf);
    stats(record, chunks[2], buf);
}

fn header(record: &TokenRecord, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::border());
    let inner = block.inner(area);
    block.render(area, buf);

    Paragraph::new(Line::from(vec![
        Span::styled(BACK, styles::text()),
        Span::raw("  "),
        Span::styled("●", styles::badge()),
        Span::raw(" "),
        Span::styled(record.display_name(), styles::primary()),
    ]))
    .render(inner, buf);
}

fn price(record: &TokenRecord, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::border());
    let inner = block.inner(area);
    block.render(area, buf);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(12)])
        .split(inner);

    Paragraph::new(vec![
        Line::styled(format_currency(record.price), styles::primary()),
        Line::styled(
            format_percent(record.change_24h),
            styles::change(record.change_24h),
        ),
    ])
    .render(chunks[0], buf);

    Paragraph::new(Line::from(Span::styled(
        format!(" {} ", t!("TokenDetail.Trade")),
        styles::button(),
    )))
    .alignment(Alignment::Right)
    .render(chunks[1], buf);
}

fn stats(record: &TokenRecord, area: Rect, buf: &mut Buffer) {
    let rows = [
        (t!("TokenDetail.Market Cap"), format_currency(record.market_cap)),
        (t!("TokenDetail.Volume"), format_currency(record.volume)),
        (t!("TokenDetail.Supply"), format_grouped(record.supply)),
    ];

    let mut rect = Rect {
        height: stat_row::HEIGHT,
        ..area
    };
    for (label, value) in rows {
        if rect.bottom() > area.bottom() {
            break;
        }
        StatRow::new(label, value).render(rect, buf);
        rect.y += stat_row::HEIGHT;
    }
}
