//! Item cards as styled text.
//!
//! A terminal can't draw the icon image, so the icon is shown as a badge
//! derived from its filename: `Icon_Small_Canister.png` → `[Small Canister]`.
//! Unknown items get `[!]`.

use ratatui::text::{Line, Span};

use astrodex_core::CardView;

use crate::theme;

/// Badge text for the card's icon.
pub fn icon_label(card: &CardView) -> String {
    if !card.known {
        return "[!]".into();
    }
    let stem = card
        .icon
        .rsplit_once('.')
        .map_or(card.icon.as_str(), |(stem, _)| stem);
    let stem = stem.strip_prefix("Icon_").unwrap_or(stem);
    format!("[{}]", stem.replace('_', " "))
}

fn badge(card: &CardView) -> Span<'static> {
    let style = if card.known {
        theme::icon_badge()
    } else {
        theme::icon_fallback()
    };
    Span::styled(icon_label(card), style)
}

/// The card's spans as its mode dictates: badge, then name, then tags.
pub fn card_spans(card: &CardView) -> Vec<Span<'static>> {
    let mut spans = vec![badge(card)];
    if let Some(name) = card.label() {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(name.to_owned(), theme::item_name()));
    }
    if let Some(tags) = card.tag_line().filter(|t| !t.is_empty()) {
        spans.push(Span::styled(format!(" · {tags}"), theme::item_tags()));
    }
    spans
}

pub fn card_line(card: &CardView) -> Line<'static> {
    Line::from(card_spans(card))
}

/// Several cards on one line, space separated.
pub fn cards_line(cards: &[CardView]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.extend(card_spans(card));
    }
    Line::from(spans)
}

/// A card expanded over several lines, with where its icon is served from.
pub fn detailed_lines(card: &CardView, icon_location: &str) -> Vec<Line<'static>> {
    let mut lines = vec![card_line(card)];
    lines.push(Line::from(vec![
        Span::styled("    icon  ", theme::key_hint()),
        Span::styled(
            format!("{icon_location} ({0}×{0})", card.icon_size()),
            theme::table_row(),
        ),
    ]));
    if !card.known {
        lines.push(Line::from(Span::styled(
            "    not in dataset",
            theme::icon_fallback(),
        )));
    }
    lines
}
