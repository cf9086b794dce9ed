//! The single placeholder shown while the dataset is absent.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
};
use throbber_widgets_tui::{Throbber, ThrobberState};

use crate::theme;

pub const LOADING_LABEL: &str = "  Loading crafting data...";

pub fn render_loading(frame: &mut Frame, area: Rect, state: &ThrobberState) {
    let [_, row, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, cell, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(32),
        Constraint::Fill(1),
    ])
    .areas(row);

    let throbber = Throbber::default()
        .label(LOADING_LABEL)
        .style(Style::default().fg(theme::ION_CYAN))
        .throbber_style(Style::default().fg(theme::NEBULA_VIOLET));

    frame.render_stateful_widget(throbber, cell, &mut state.clone());
}
