//! Application core: event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs, Wrap},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use astrodex_api::DataClient;
use astrodex_config::Config;
use astrodex_core::{CardMode, DataStore};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, EventReader, Pacing};
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

/// Where the one data load stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Loading,
    Loaded { items: usize, recipes: usize },
    /// Terminal: the viewer stays inert until restart.
    Failed(String),
}

/// Top-level application state and event loop.
pub struct App {
    active_screen: ScreenId,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    store: DataStore,
    /// Taken when the data bridge is spawned.
    client: Option<DataClient>,
    data_cancel: CancellationToken,
    load_status: LoadStatus,
    search_active: bool,
    search_query: String,
}

impl App {
    pub fn new(
        store: DataStore,
        client: Option<DataClient>,
        config: &Arc<Config>,
        result_mode: CardMode,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(&store, config, result_mode).into_iter().collect();

        Self {
            active_screen: ScreenId::default(),
            screens,
            running: true,
            action_tx,
            action_rx,
            store,
            client,
            data_cancel: CancellationToken::new(),
            load_status: LoadStatus::default(),
            search_active: false,
            search_query: String::new(),
        }
    }

    fn focus_active(&mut self) {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;
        self.focus_active();

        if let Some(client) = self.client.take() {
            let store = self.store.clone();
            let cancel = self.data_cancel.clone();
            let tx = self.action_tx.clone();
            tokio::spawn(async move {
                crate::data_bridge::spawn_data_bridge(client, store, tx, cancel).await;
            });
        }

        let mut events = EventReader::spawn(Pacing::default());

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.data_cancel.cancel();
        drop(events);
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// screen-specific keys are delegated to the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let quit = matches!(
            (key.modifiers, key.code),
            (KeyModifiers::CONTROL, KeyCode::Char('c')) | (KeyModifiers::NONE, KeyCode::Char('q'))
        );

        // The failure dialog blocks everything but quitting.
        if matches!(self.load_status, LoadStatus::Failed(_)) {
            return Ok(quit.then_some(Action::Quit));
        }

        if self.search_active {
            return match key.code {
                KeyCode::Esc => Ok(Some(Action::ClearSearch)),
                KeyCode::Enter => Ok(Some(Action::ApplySearch(self.search_query.clone()))),
                KeyCode::Backspace => {
                    self.search_query.pop();
                    Ok(None)
                }
                KeyCode::Char('c') if key.modifiers == KeyModifiers::CONTROL => {
                    Ok(Some(Action::Quit))
                }
                KeyCode::Char(c) => {
                    self.search_query.push(c);
                    Ok(None)
                }
                _ => Ok(None),
            };
        }

        if quit {
            return Ok(Some(Action::Quit));
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('/')) => return Ok(Some(Action::OpenSearch)),
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
                if let Some(screen) = ScreenId::from_number(c as u8 - b'0') {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
                return Ok(None);
            }
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            _ => {}
        }

        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            return screen.handle_key_event(key);
        }
        Ok(None)
    }

    /// Process a single action: update app state and propagate to screens.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Resize(w, h) => debug!(w, h, "terminal resized"),

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }

            Action::OpenSearch => {
                self.search_active = true;
                self.search_query.clear();
                self.action_tx.send(Action::SwitchScreen(ScreenId::Crafting))?;
            }

            Action::ApplySearch(_) | Action::ClearSearch => {
                self.search_active = false;
                self.search_query.clear();
                self.forward_to(ScreenId::Crafting, action)?;
            }

            Action::CycleCardMode => self.forward_to(self.active_screen, action)?,

            Action::DataLoaded(dataset) => {
                info!(
                    items = dataset.item_count(),
                    recipes = dataset.recipes().len(),
                    "dataset ready"
                );
                self.load_status = LoadStatus::Loaded {
                    items: dataset.item_count(),
                    recipes: dataset.recipes().len(),
                };
                self.broadcast(action)?;
            }

            Action::LoadFailed(message) => {
                error!(%message, "data load failed");
                self.load_status = LoadStatus::Failed(message.clone());
                self.search_active = false;
            }

            Action::Tick => self.broadcast(action)?,

            Action::Render => {}
        }
        Ok(())
    }

    fn forward_to(&mut self, id: ScreenId, action: &Action) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&id) {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let [content_area, tab_area, status_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, content_area);
        }
        self.render_tab_bar(frame, tab_area);
        self.render_status_bar(frame, status_area);

        if let LoadStatus::Failed(message) = &self.load_status {
            render_error_dialog(frame, area, message);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(format!(" {} {} ", id.number(), id.label()), style))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if self.search_active {
            let line = Line::from(vec![
                Span::styled(" / ", Style::default().fg(theme::NEBULA_VIOLET)),
                Span::styled(&self.search_query, Style::default().fg(theme::ION_CYAN)),
                Span::styled("█", Style::default().fg(theme::ION_CYAN)),
                Span::styled("  Esc clear  Enter apply", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let indicator = match &self.load_status {
            LoadStatus::Loading => {
                Span::styled("◐ loading", Style::default().fg(theme::HAZARD_AMBER))
            }
            LoadStatus::Loaded { items, recipes } => Span::styled(
                format!("● {items} items · {recipes} recipes"),
                Style::default().fg(theme::OXYGEN_GREEN),
            ),
            LoadStatus::Failed(_) => {
                Span::styled("✗ load failed", Style::default().fg(theme::ALERT_RED))
            }
        };

        let hints = Span::styled(" │ 1-2 screens  / search  q quit", theme::key_hint());
        let line = Line::from(vec![Span::raw(" "), indicator, hints]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Blocking dialog shown after the load failed.
fn render_error_dialog(frame: &mut Frame, area: Rect, message: &str) {
    let width = 64u16.min(area.width.saturating_sub(4));
    let height = 8u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let dialog_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, dialog_area);
    frame.render_widget(
        Block::default().style(Style::default().bg(theme::VOID_BG)),
        dialog_area,
    );

    let block = Block::default()
        .title(" Could not load data ")
        .title_style(Style::default().fg(theme::ALERT_RED))
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(theme::ALERT_RED));
    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let text = vec![
        Line::from(Span::styled(message.to_owned(), theme::table_row())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Restart to try again.  ", theme::key_hint()),
            Span::styled("q ", theme::key_hint_key()),
            Span::styled("quit", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::test_support::{buffer_text, printer_dataset};

    fn app() -> App {
        App::new(
            DataStore::new(),
            None,
            &Arc::new(Config::default()),
            CardMode::Compact,
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Feed a key through the app the way the event loop does.
    fn press(app: &mut App, code: KeyCode) {
        if let Some(action) = app.handle_key_event(key(code)).unwrap() {
            dispatch(app, action);
        }
    }

    fn dispatch(app: &mut App, action: Action) {
        app.process_action(&action).unwrap();
        while let Ok(next) = app.action_rx.try_recv() {
            app.process_action(&next).unwrap();
        }
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 32)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        buffer_text(&terminal)
    }

    fn loaded_app() -> App {
        let mut app = app();
        let dataset = app.store.set(printer_dataset());
        dispatch(&mut app, Action::DataLoaded(dataset));
        app
    }

    #[test]
    fn shows_loading_until_data_arrives() {
        let app = app();
        let text = render(&app);
        assert!(text.contains("Loading crafting data"));
        assert!(text.contains("◐ loading"));
    }

    #[test]
    fn renders_tables_once_loaded() {
        let app = loaded_app();
        assert_eq!(app.load_status, LoadStatus::Loaded { items: 7, recipes: 5 });
        let text = render(&app);
        assert!(text.contains("Small Printer (2)"));
        assert!(text.contains("7 items · 5 recipes"));
    }

    #[test]
    fn number_keys_and_tab_switch_screens() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.active_screen, ScreenId::Items);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_screen, ScreenId::Crafting);
        press(&mut app, KeyCode::Char('7'));
        assert_eq!(app.active_screen, ScreenId::Crafting);
    }

    #[test]
    fn search_prompt_builds_a_search_table() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Char('/'));
        assert!(app.search_active);
        assert_eq!(app.active_screen, ScreenId::Crafting);

        for c in "Copper".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert!(render(&app).contains("/ Copper█"));
        press(&mut app, KeyCode::Enter);

        assert!(!app.search_active);
        assert!(render(&app).contains("For Copper (1)"));

        // Esc on the screen drops the search table again.
        press(&mut app, KeyCode::Esc);
        assert!(!render(&app).contains("For Copper"));
    }

    #[test]
    fn q_in_prompt_is_text_not_quit() {
        let mut app = loaded_app();
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        assert_eq!(app.search_query, "q");
    }

    #[test]
    fn load_failure_blocks_input_except_quit() {
        let mut app = app();
        dispatch(&mut app, Action::LoadFailed("Failed to load data from x: 503".into()));

        let text = render(&app);
        assert!(text.contains("Could not load data"));
        assert!(text.contains("Failed to load data from x: 503"));

        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.active_screen, ScreenId::Crafting);
        press(&mut app, KeyCode::Char('/'));
        assert!(!app.search_active);

        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }
}
