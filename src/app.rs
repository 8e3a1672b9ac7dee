use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use ratatui::{layout::Rect, Frame};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::data::{TokenId, TokenResolver};
use crate::render::{DirtyFlags, RenderState};
use crate::views::{self, DetailState, Resolved, TokenDetail};
use crate::widgets::{Loading, Prompt, PromptOutcome, Terminal};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The detail panel hosted in a full-screen terminal, plus the identifier prompt
pub struct App {
    view: TokenDetail,
    prompt: Prompt,
    loading: Loading,
    resolver: Arc<dyn TokenResolver>,
    update_tx: mpsc::UnboundedSender<Resolved>,
    back_requested: Rc<Cell<bool>>,
}

impl App {
    pub fn new(
        resolver: Arc<dyn TokenResolver>,
        update_tx: mpsc::UnboundedSender<Resolved>,
    ) -> Self {
        let back_requested = Rc::new(Cell::new(false));
        // there is no list view to return to, so going back ends the session
        let view = TokenDetail::new({
            let back_requested = Rc::clone(&back_requested);
            move || back_requested.set(true)
        });
        Self {
            view,
            prompt: Prompt::default(),
            loading: Loading::default(),
            resolver,
            update_tx,
            back_requested,
        }
    }

    pub fn view(&self) -> &TokenDetail {
        &self.view
    }

    /// Show `id`, resolving it in the background if it differs from the current one
    pub fn navigate(&mut self, id: TokenId) -> bool {
        let Some(ticket) = self.view.request(id) else {
            return false;
        };
        views::resolve_in_background(&self.resolver, ticket, self.update_tx.clone());
        true
    }

    pub fn on_resolved(&mut self, resolved: Resolved) -> bool {
        self.view.settle(&resolved.ticket, resolved.result)
    }

    pub fn handle_key(&mut self, event: KeyEvent) -> (Flow, DirtyFlags) {
        if event.kind != KeyEventKind::Press {
            return (Flow::Continue, DirtyFlags::NONE);
        }

        if self.prompt.is_visible() {
            return match self.prompt.handle_key(event) {
                PromptOutcome::Editing => (Flow::Continue, DirtyFlags::PROMPT),
                PromptOutcome::Cancelled => (Flow::Continue, DirtyFlags::ALL),
                PromptOutcome::Submitted(id) => {
                    tracing::info!(%id, "切换代币");
                    self.navigate(id);
                    (Flow::Continue, DirtyFlags::ALL)
                }
            };
        }

        match event {
            key!(CONTROL, 'c') | key!('q') => (Flow::Exit, DirtyFlags::NONE),
            key!(Esc) | key!(Backspace) | key!('b') => {
                self.view.back();
                if self.back_requested.take() {
                    (Flow::Exit, DirtyFlags::NONE)
                } else {
                    (Flow::Continue, DirtyFlags::ALL)
                }
            }
            key!('/') => {
                self.prompt.open();
                (Flow::Continue, DirtyFlags::PROMPT)
            }
            _ => (Flow::Continue, DirtyFlags::NONE),
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let rect = frame.size();
        if rect.height < 2 {
            return;
        }
        let body = Rect {
            height: rect.height - 1,
            ..rect
        };
        let bottom = Rect {
            y: rect.y + rect.height - 1,
            height: 1,
            ..rect
        };

        frame.render_widget(self.view.widget(&self.loading), body);
        views::footer::render(frame, bottom, self.view.identifier(), self.view.state());
        self.prompt.render(frame, body);
    }
}

pub async fn run(config: Config, resolver: Arc<dyn TokenResolver>) -> anyhow::Result<()> {
    let (update_tx, mut update_rx) = mpsc::unbounded_channel();
    let mut app = App::new(resolver, update_tx);
    let mut terminal = Terminal::new()?;

    let mut render_tick = tokio::time::interval(Duration::from_millis(33)); // ~30 FPS
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let mut events = crossterm::event::EventStream::new();
    let mut render_state = RenderState::new();
    render_state.mark_all_dirty();

    app.navigate(config.token);

    loop {
        tokio::select! {
            _ = render_tick.tick() => {
                if matches!(app.view().state(), DetailState::Resolving) {
                    render_state.mark_dirty(DirtyFlags::LOADING);
                }
                if render_state.needs_render() {
                    tracing::trace!(dirty = ?render_state.dirty(), "渲染");
                    terminal.draw(|frame| app.draw(frame)).context("绘制界面失败")?;
                    render_state.clear();
                } else {
                    render_state.skip();
                }
            }
            Some(resolved) = update_rx.recv() => {
                if app.on_resolved(resolved) {
                    render_state.mark_dirty(DirtyFlags::NONE.mark_settled());
                }
            }
            Some(event) = tokio_stream::StreamExt::next(&mut events) => {
                let event = match event {
                    Ok(Event::Key(event)) => event,
                    Ok(Event::Resize(..)) => {
                        render_state.mark_all_dirty();
                        continue;
                    }
                    Ok(_) => continue,
                    Err(err) => return Err(err).context("接收终端事件失败"),
                };

                let (flow, dirty) = app.handle_key(event);
                render_state.mark_dirty(dirty);
                if flow == Flow::Exit {
                    break;
                }
            }
        }
    }

    tracing::info!(stats = %render_state.stats(), "主循环退出");
    Ok(())
}
