//! Crafting screen: a selector of recipe tables, the selected table's rows,
//! and the selected recipe expanded into detailed cards.
//!
//! Tables come from the configured panels plus an optional search table
//! driven by the `/` prompt. The search table is the only one a query
//! touches; clearing it drops its store subscription.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState,
};
use throbber_widgets_tui::ThrobberState;
use tracing::{debug, warn};

use astrodex_config::Config;
use astrodex_core::{
    CardMode, CardView, CraftingPanel, DataStore, FilterSpec, RecipeTable, TableView, ViewState,
};

use crate::action::Action;
use crate::component::Component;
use crate::screens::icon_location;
use crate::theme;
use crate::widgets::card::{card_line, cards_line, detailed_lines};
use crate::widgets::loading::render_loading;

/// A table as listed in the selector.
struct Listed {
    view: TableView,
    search: bool,
}

pub struct CraftingScreen {
    store: DataStore,
    config: Arc<Config>,
    panel: CraftingPanel,
    search: Option<RecipeTable>,
    search_error: Option<String>,
    result_mode: CardMode,
    selected_table: usize,
    row_state: TableState,
    throbber_state: ThrobberState,
    focused: bool,
}

impl CraftingScreen {
    pub fn new(store: &DataStore, config: Arc<Config>, result_mode: CardMode) -> Self {
        let panel = CraftingPanel::with_filters(store, config.panels.iter().cloned());
        panel.set_result_mode(result_mode);

        Self {
            store: store.clone(),
            config,
            panel,
            search: None,
            search_error: None,
            result_mode,
            selected_table: 0,
            row_state: TableState::default().with_selected(Some(0)),
            throbber_state: ThrobberState::default(),
            focused: false,
        }
    }

    /// Search table first (if any), then the configured panels. `Loading`
    /// until every panel table has been derived.
    fn tables(&self) -> ViewState<Vec<Listed>> {
        let ViewState::Ready(views) = self.panel.view() else {
            return ViewState::Loading;
        };

        let mut listed = Vec::with_capacity(views.len() + 1);
        if let Some(ViewState::Ready(view)) = self.search.as_ref().map(RecipeTable::view) {
            listed.push(Listed { view, search: true });
        }
        listed.extend(views.into_iter().map(|view| Listed {
            view,
            search: false,
        }));
        ViewState::Ready(listed)
    }

    fn table_count(&self) -> usize {
        self.panel.len() + usize::from(self.search.is_some())
    }

    fn selected_row_count(&self) -> usize {
        match self.tables() {
            ViewState::Ready(tables) => tables
                .get(self.selected_table)
                .map_or(0, |listed| listed.view.count()),
            ViewState::Loading => 0,
        }
    }

    fn shift_table(&mut self, forward: bool) {
        let count = self.table_count();
        if count == 0 {
            return;
        }
        self.selected_table = if forward {
            (self.selected_table + 1) % count
        } else {
            (self.selected_table + count - 1) % count
        };
        self.row_state.select(Some(0));
    }

    fn move_row(&mut self, down: bool) {
        let rows = self.selected_row_count();
        if rows == 0 {
            return;
        }
        let current = self.row_state.selected().unwrap_or(0);
        let next = if down {
            (current + 1).min(rows - 1)
        } else {
            current.saturating_sub(1)
        };
        self.row_state.select(Some(next));
    }

    fn cycle_mode(&mut self) {
        self.result_mode = self.result_mode.next();
        self.panel.set_result_mode(self.result_mode);
        if let Some(search) = &self.search {
            search.set_result_mode(self.result_mode);
        }
        debug!(mode = %self.result_mode, "result card mode changed");
    }

    fn apply_search(&mut self, query: &str) {
        let spec = match FilterSpec::parse_query(query) {
            Ok(spec) => spec,
            Err(e) => {
                warn!(query, error = %e, "rejected search query");
                self.search_error = Some(e.to_string());
                return;
            }
        };

        if spec.is_identity() {
            self.clear_search();
            return;
        }

        match &self.search {
            Some(table) => table.set_filter(spec),
            None => {
                let table = RecipeTable::new(&self.store, spec);
                table.set_result_mode(self.result_mode);
                self.search = Some(table);
            }
        }
        self.search_error = None;
        self.selected_table = 0;
        self.row_state.select(Some(0));
    }

    fn clear_search(&mut self) {
        if self.search.take().is_some() {
            self.selected_table = self.selected_table.saturating_sub(1);
            self.row_state.select(Some(0));
        }
        self.search_error = None;
    }

    // ── Rendering ───────────────────────────────────────────────

    fn render_selector(&self, frame: &mut Frame, area: Rect, tables: &[Listed]) {
        let items: Vec<ListItem> = tables
            .iter()
            .map(|listed| {
                let heading = listed.view.heading();
                if listed.search {
                    ListItem::new(Line::from(vec![
                        Span::styled("/ ", Style::default().fg(theme::HAZARD_AMBER)),
                        Span::raw(heading),
                    ]))
                } else {
                    ListItem::new(heading)
                }
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .title(" Tables ")
                    .title_style(theme::title_style())
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(theme::border_default()),
            )
            .style(theme::table_row())
            .highlight_style(theme::table_selected())
            .highlight_symbol("▸ ");

        let mut state = ListState::default().with_selected(Some(self.selected_table));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_rows(&self, frame: &mut Frame, area: Rect, listed: &Listed) {
        let header = Row::new(vec![
            Cell::from("Materials").style(theme::table_header()),
            Cell::from("Result").style(theme::table_header()),
            Cell::from("Station").style(theme::table_header()),
            Cell::from("Type").style(theme::table_header()),
        ]);

        let rows: Vec<Row> = listed
            .view
            .rows
            .iter()
            .map(|row| {
                Row::new(vec![
                    Cell::from(cards_line(&row.materials)),
                    Cell::from(card_line(&row.result)),
                    Cell::from(row.station.clone()).style(Style::default().fg(theme::SOLAR_ORANGE)),
                    Cell::from(row.kind.clone()),
                ])
                .style(theme::table_row())
            })
            .collect();

        let widths = [
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(18),
            Constraint::Percentage(12),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .title(format!(" {} ", listed.view.heading()))
                    .title_style(theme::title_style())
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(if self.focused {
                        theme::border_focused()
                    } else {
                        theme::border_default()
                    }),
            )
            .row_highlight_style(theme::table_selected());

        let mut state = self.row_state;
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, listed: &Listed) {
        let block = Block::default()
            .title(" Recipe ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(row) = listed.view.rows.get(self.row_state.selected().unwrap_or(0)) else {
            frame.render_widget(
                Paragraph::new(Span::styled("  No recipes match", theme::key_hint())),
                inner,
            );
            return;
        };

        let dataset = self.store.get();
        let dataset = dataset.as_deref();
        let result = CardView::new(dataset, &row.result.name, CardMode::Detailed);

        let section = Style::default()
            .fg(theme::NEBULA_VIOLET)
            .add_modifier(Modifier::BOLD);

        let mut lines = vec![Line::from(Span::styled(" Result", section))];
        lines.extend(detailed_lines(
            &result,
            &icon_location(&self.config, &result.icon),
        ));
        lines.push(Line::from(Span::styled(" Materials", section)));
        for material in &row.materials {
            let card = CardView::new(dataset, &material.name, CardMode::Detailed);
            let mut spans = vec![Span::raw("  ")];
            spans.extend(card_line(&card).spans);
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(vec![
            Span::styled("  at ", theme::key_hint()),
            Span::styled(row.station.clone(), Style::default().fg(theme::SOLAR_ORANGE)),
            Span::styled("  type ", theme::key_hint()),
            Span::styled(row.kind.clone(), theme::table_row()),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled("  h/l ", theme::key_hint_key()),
            Span::styled("table  ", theme::key_hint()),
            Span::styled("j/k ", theme::key_hint_key()),
            Span::styled("recipe  ", theme::key_hint()),
            Span::styled("m ", theme::key_hint_key()),
            Span::styled(format!("mode ({})  ", self.result_mode), theme::key_hint()),
            Span::styled("/ ", theme::key_hint_key()),
            Span::styled("search  ", theme::key_hint()),
        ];
        if self.search.is_some() {
            spans.push(Span::styled("Esc ", theme::key_hint_key()));
            spans.push(Span::styled("clear search  ", theme::key_hint()));
        }
        if let Some(err) = &self.search_error {
            spans.push(Span::styled(
                format!("✗ {err}"),
                Style::default().fg(theme::ALERT_RED),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Component for CraftingScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('h') | KeyCode::Left => self.shift_table(false),
            KeyCode::Char('l') | KeyCode::Right => self.shift_table(true),
            KeyCode::Char('j') | KeyCode::Down => self.move_row(true),
            KeyCode::Char('k') | KeyCode::Up => self.move_row(false),
            KeyCode::Char('m') => return Ok(Some(Action::CycleCardMode)),
            KeyCode::Esc if self.search.is_some() => return Ok(Some(Action::ClearSearch)),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick if self.panel.view().is_loading() => self.throbber_state.calc_next(),
            Action::DataLoaded(_) => {
                self.selected_table = 0;
                self.row_state.select(Some(0));
            }
            Action::CycleCardMode => self.cycle_mode(),
            Action::ApplySearch(query) => self.apply_search(query),
            Action::ClearSearch => self.clear_search(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Crafting ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let ViewState::Ready(tables) = self.tables() else {
            render_loading(frame, inner, &self.throbber_state);
            return;
        };

        let [body, hints] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);
        let [selector, main] =
            Layout::horizontal([Constraint::Length(30), Constraint::Min(20)]).areas(body);
        let [rows_area, detail_area] =
            Layout::vertical([Constraint::Min(4), Constraint::Length(10)]).areas(main);

        self.render_selector(frame, selector, &tables);
        if let Some(listed) = tables.get(self.selected_table) {
            self.render_rows(frame, rows_area, listed);
            self.render_detail(frame, detail_area, listed);
        } else {
            frame.render_widget(
                Paragraph::new(Span::styled("  No tables configured", theme::key_hint())),
                main,
            );
        }
        self.render_hints(frame, hints);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
