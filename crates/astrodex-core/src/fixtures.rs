// Shared test datasets and log capture.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::model::{Dataset, Item, Recipe};

struct ErrorCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for ErrorCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Run `f` and count the `error!` events it emits on this thread.
pub(crate) fn count_errors<R>(f: impl FnOnce() -> R) -> (R, usize) {
    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(ErrorCounter(Arc::clone(&count)));
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, count.load(Ordering::SeqCst))
}

fn item(name: &str, icon: &str, tags: &[&str]) -> Item {
    Item {
        name: name.into(),
        icon: icon.into(),
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

/// Two items, one recipe consuming `A` twice to make `B`.
pub(crate) fn example_dataset() -> Dataset {
    Dataset::new(
        [item("A", "a.png", &[]), item("B", "b.png", &["metal"])],
        vec![recipe("B", &["A", "A"], "Small Printer", "refining")],
    )
}

/// A handful of printer, refining and chemistry recipes.
pub(crate) fn printer_dataset() -> Dataset {
    Dataset::new(
        [
            item("Compound", "Icon_Compound.png", &["Natural"]),
            item("Resin", "Icon_Resin.png", &["Natural"]),
            item("Malachite", "Icon_Malachite.png", &["Natural"]),
            item("Copper", "Icon_Copper.png", &["Refined"]),
            item("Tether", "Icon_Tether.png", &[]),
            item("Small Canister", "Icon_Small_Canister.png", &[]),
            item("Medium Printer", "Icon_Medium_Printer.png", &[]),
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
