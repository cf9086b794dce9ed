//! Item name → display attributes, with the "unknown item" fallback.

use tracing::trace;

use crate::error::CoreError;
use crate::model::{Dataset, Item};

/// Icon shown for items the dataset does not know (or before it loads).
pub const FALLBACK_ICON: &str = "Icon_Warning.png";

/// What a card needs to draw an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemDisplay<'a> {
    pub icon: &'a str,
    pub tags: &'a [String],
}

impl ItemDisplay<'_> {
    pub const FALLBACK: ItemDisplay<'static> = ItemDisplay {
        icon: FALLBACK_ICON,
        tags: &[],
    };
}

/// Look an item up, distinguishing "no data" from "no such item".
pub fn try_resolve<'a>(dataset: Option<&'a Dataset>, name: &str) -> Result<&'a Item, CoreError> {
    let dataset = dataset.ok_or(CoreError::DataUnavailable)?;
    dataset.item(name).ok_or_else(|| CoreError::UnknownItem {
        name: name.to_owned(),
    })
}

/// Resolve display attributes, falling back to the warning icon with no tags.
pub fn resolve<'a>(dataset: Option<&'a Dataset>, name: &str) -> ItemDisplay<'a> {
    match try_resolve(dataset, name) {
        Ok(item) => ItemDisplay {
            icon: &item.icon,
            tags: &item.tags,
        },
        Err(err) => {
            trace!(%err, "using fallback item display");
            ItemDisplay::FALLBACK
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(
            [
                Item {
                    name: "A".into(),
                    icon: "a.png".into(),
                    tags: Vec::new(),
                },
                Item {
                    name: "B".into(),
                    icon: "b.png".into(),
                    tags: vec!["metal".into()],
                },
            ],
            Vec::new(),
        )
    }

    #[test]
    fn absent_dataset_falls_back() {
        let display = resolve(None, "anything");
        assert_eq!(display.icon, "Icon_Warning.png");
        assert!(display.tags.is_empty());
        assert_eq!(display, ItemDisplay::FALLBACK);
    }

    #[test]
    fn unknown_name_falls_back() {
        let ds = dataset();
        let display = resolve(Some(&ds), "Ghost");
        assert_eq!(display, ItemDisplay::FALLBACK);
    }

    #[test]
    fn known_name_resolves() {
        let ds = dataset();
        let display = resolve(Some(&ds), "B");
        assert_eq!(display.icon, "b.png");
        assert_eq!(display.tags, ["metal"]);
        assert_ne!(display, ItemDisplay::FALLBACK);
    }

    #[test]
    fn try_resolve_distinguishes_errors() {
        let ds = dataset();
        assert!(matches!(try_resolve(None, "A"), Err(CoreError::DataUnavailable)));
        assert!(matches!(
            try_resolve(Some(&ds), "Ghost"),
            Err(CoreError::UnknownItem { ref name }) if name == "Ghost"
        ));
        assert_eq!(try_resolve(Some(&ds), "A").map(|i| i.icon.as_str()).ok(), Some("a.png"));
    }
}
