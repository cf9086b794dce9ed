//! Items screen: the item catalog with the selected item as a card.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};
use throbber_widgets_tui::ThrobberState;

use astrodex_config::Config;
use astrodex_core::{CardMode, CardView, DataStore, Dataset, ItemCard, ViewState};

use crate::action::Action;
use crate::component::Component;
use crate::screens::icon_location;
use crate::theme;
use crate::widgets::card::{card_line, detailed_lines};
use crate::widgets::loading::render_loading;

pub struct ItemsScreen {
    store: DataStore,
    config: Arc<Config>,
    card_mode: CardMode,
    table_state: TableState,
    throbber_state: ThrobberState,
    focused: bool,
}

impl ItemsScreen {
    pub fn new(store: &DataStore, config: Arc<Config>) -> Self {
        Self {
            store: store.clone(),
            config,
            card_mode: CardMode::Detailed,
            table_state: TableState::default().with_selected(Some(0)),
            throbber_state: ThrobberState::default(),
            focused: false,
        }
    }

    fn item_count(&self) -> usize {
        self.store.get().map_or(0, |ds| ds.item_count())
    }

    fn move_selection(&mut self, down: bool) {
        let count = self.item_count();
        if count == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = if down {
            (current + 1).min(count - 1)
        } else {
            current.saturating_sub(1)
        };
        self.table_state.select(Some(next));
    }

    fn render_table(&self, frame: &mut Frame, area: Rect, dataset: &Dataset) {
        let header = Row::new(vec![
            Cell::from("Item").style(theme::table_header()),
            Cell::from("Tags").style(theme::table_header()),
            Cell::from("Made by").style(theme::table_header()),
            Cell::from("Used in").style(theme::table_header()),
        ]);

        let rows: Vec<Row> = dataset
            .items()
            .map(|item| {
                let card = CardView::new(Some(dataset), &item.name, CardMode::Compact);
                Row::new(vec![
                    Cell::from(card_line(&card)),
                    Cell::from(item.tags.join(", ")).style(theme::item_tags()),
                    Cell::from(dataset.recipes_for(&item.name).count().to_string()),
                    Cell::from(dataset.recipes_using(&item.name).count().to_string()),
                ])
                .style(theme::table_row())
            })
            .collect();

        let widths = [
            Constraint::Percentage(45),
            Constraint::Percentage(31),
            Constraint::Percentage(12),
            Constraint::Percentage(12),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(
                Block::default()
                    .title(format!(" Items ({}) ", dataset.item_count()))
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

        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, dataset: &Dataset) {
        let block = Block::default()
            .title(" Item ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(item) = dataset.items().nth(self.table_state.selected().unwrap_or(0)) else {
            return;
        };
        let ViewState::Ready(card) = ItemCard::new(&self.store, &item.name, self.card_mode).view()
        else {
            return;
        };

        let section = Style::default()
            .fg(theme::NEBULA_VIOLET)
            .add_modifier(Modifier::BOLD);

        let mut lines = detailed_lines(&card, &icon_location(&self.config, &card.icon));
        let stations: Vec<&str> = dataset
            .recipes_for(&item.name)
            .map(|r| r.station.as_str())
            .collect();
        if !stations.is_empty() {
            lines.push(Line::from(vec![
                Span::styled(" Made at ", section),
                Span::styled(stations.join(", "), Style::default().fg(theme::SOLAR_ORANGE)),
            ]));
        }
        let used_for: Vec<&str> = dataset
            .recipes_using(&item.name)
            .map(|r| r.result.as_str())
            .collect();
        if !used_for.is_empty() {
            lines.push(Line::from(vec![
                Span::styled(" Used for ", section),
                Span::styled(used_for.join(", "), theme::item_name()),
            ]));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for ItemsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(true),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(false),
            KeyCode::Char('m') => return Ok(Some(Action::CycleCardMode)),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::Tick if !self.store.is_loaded() => self.throbber_state.calc_next(),
            Action::DataLoaded(_) => self.table_state.select(Some(0)),
            Action::CycleCardMode => self.card_mode = self.card_mode.next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let Some(dataset) = self.store.get() else {
            let block = Block::default()
                .title(" Items ")
                .title_style(theme::title_style())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme::border_default());
            let inner = block.inner(area);
            frame.render_widget(block, area);
            render_loading(frame, inner, &self.throbber_state);
            return;
        };

        let [table_area, detail_area, hints] = Layout::vertical([
            Constraint::Min(4),
            Constraint::Length(7),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_table(frame, table_area, &dataset);
        self.render_detail(frame, detail_area, &dataset);

        let hints_line = Line::from(vec![
            Span::styled("  j/k ", theme::key_hint_key()),
            Span::styled("item  ", theme::key_hint()),
            Span::styled("m ", theme::key_hint_key()),
            Span::styled(format!("card mode ({})", self.card_mode), theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints_line), hints);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
