// Shared helpers for rendering tests.

use ratatui::{Terminal, backend::TestBackend};

use astrodex_core::{Dataset, Item, Recipe};

use crate::component::Component;

/// Render `component` full-frame and return the buffer as text, one line
/// per row.
#[allow(clippy::unwrap_used)]
pub(crate) fn draw(component: &impl Component, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            component.render(frame, area);
        })
        .unwrap();
    buffer_text(&terminal)
}

pub(crate) fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn item(name: &str, tags: &[&str]) -> Item {
    Item {
        name: name.into(),
        icon: format!("Icon_{}.png", name.replace(' ', "_")),
        tags: tags.iter().map(ToString::to_string).collect(),
    }
}

fn recipe(result: &str, materials: &[&str], station: &str, kind: &str) -> Recipe {
    Recipe {
        result: result.into(),
        materials: materials.iter().map(ToString::to_string).collect(),
        station: station.into(),
        kind: kind.into(),
    }
}

pub(crate) fn printer_dataset() -> Dataset {
    Dataset::new(
        [
            item("Compound", &["Natural"]),
            item("Resin", &["Natural"]),
            item("Malachite", &["Natural"]),
            item("Copper", &["Refined"]),
            item("Tether", &[]),
            item("Small Canister", &[]),
            item("Medium Printer", &[]),
        ],
        vec![
            recipe("Tether", &["Compound"], "Backpack Printer", "printing"),
            recipe("Small Canister", &["Resin"], "Small Printer", "printing"),
            recipe("Medium Printer", &["Copper", "Resin"], "Small Printer", "printing"),
            recipe("Copper", &["Malachite"], "Smelting Furnace", "refining"),
            recipe("Graphene", &["Hydrazine", "Graphite"], "Chemistry Lab", "chemistry"),
        ],
    )
}
