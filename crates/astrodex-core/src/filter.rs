// ── Recipe filtering ──
//
// A `FilterSpec` is a conjunction of optional constraints. Filtering is
// stable (never re-sorts), and the title derived from a filter follows a fixed
// priority that only looks at the first set field. An empty string counts as
// unset.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::Recipe;

/// Constraints selecting a subset of recipes. Unset fields match anything.
///
/// Unknown keys in the attribute form are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<Vec<String>>,
}

impl FilterSpec {
    /// The identity filter.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn station(station: impl Into<String>) -> Self {
        Self {
            station: Some(station.into()),
            ..Self::default()
        }
    }

    pub fn kind(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    pub fn result(result: impl Into<String>) -> Self {
        Self {
            result: Some(result.into()),
            ..Self::default()
        }
    }

    pub fn materials<I, S>(materials: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            materials: Some(materials.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn is_identity(&self) -> bool {
        self.station_constraint().is_none()
            && self.kind_constraint().is_none()
            && self.result_constraint().is_none()
            && self.materials.is_none()
    }

    fn station_constraint(&self) -> Option<&str> {
        non_empty(self.station.as_deref())
    }

    fn kind_constraint(&self) -> Option<&str> {
        non_empty(self.kind.as_deref())
    }

    fn result_constraint(&self) -> Option<&str> {
        non_empty(self.result.as_deref())
    }

    /// Whether `recipe` satisfies every set field.
    ///
    /// `materials` requires each listed name to appear in the recipe; order
    /// and repetition in the filter don't matter.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.station_constraint().is_none_or(|s| recipe.station == s)
            && self.kind_constraint().is_none_or(|k| recipe.kind == k)
            && self.result_constraint().is_none_or(|r| recipe.result == r)
            && self
                .materials
                .as_ref()
                .is_none_or(|wanted| wanted.iter().all(|m| recipe.materials.contains(m)))
    }

    // ── Attribute form ───────────────────────────────────────────────

    /// Parse the JSON attribute form, e.g. `{"station": "Small Printer"}`.
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        serde_json::from_str(raw).map_err(|e| CoreError::InvalidFilter {
            message: e.to_string(),
        })
    }

    // ── Query form ───────────────────────────────────────────────────

    /// Parse a search prompt query.
    ///
    /// Clauses are separated by `;` and written `key:value` with keys
    /// `station`, `type`, `result` and `materials` (comma-separated). A clause
    /// without a key is a `result`. An empty query is the identity filter.
    ///
    /// ```
    /// use astrodex_core::FilterSpec;
    ///
    /// let spec = FilterSpec::parse_query("station: Small Printer; materials: Resin, Compound").unwrap();
    /// assert_eq!(spec.station.as_deref(), Some("Small Printer"));
    /// assert_eq!(spec.materials.unwrap(), ["Resin", "Compound"]);
    /// ```
    pub fn parse_query(query: &str) -> Result<Self, CoreError> {
        let mut spec = Self::default();

        for clause in query.split(';').map(str::trim).filter(|c| !c.is_empty()) {
            let (key, value) = match clause.split_once(':') {
                Some((key, value)) => (key.trim().to_ascii_lowercase(), value.trim()),
                None => ("result".to_owned(), clause),
            };
            if value.is_empty() {
                return Err(CoreError::InvalidFilter {
                    message: format!("empty value for '{key}'"),
                });
            }

            match key.as_str() {
                "station" => spec.station = Some(value.to_owned()),
                "type" | "kind" => spec.kind = Some(value.to_owned()),
                "result" | "for" => spec.result = Some(value.to_owned()),
                "materials" | "material" | "from" => {
                    let names = value
                        .split(',')
                        .map(str::trim)
                        .filter(|n| !n.is_empty())
                        .map(str::to_owned);
                    spec.materials.get_or_insert_with(Vec::new).extend(names);
                }
                other => {
                    return Err(CoreError::InvalidFilter {
                        message: format!("unknown filter key '{other}'"),
                    });
                }
            }
        }

        Ok(spec)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Stable filter: surviving recipes keep their input order.
pub fn apply<'a>(recipes: &'a [Recipe], spec: &FilterSpec) -> Vec<&'a Recipe> {
    recipes.iter().filter(|r| spec.matches(r)).collect()
}

/// Heading for a table showing `spec`.
///
/// Priority: station, then type (title-cased), then result, then materials.
/// Only the first set field contributes even when several are set.
pub fn title_for(spec: &FilterSpec) -> String {
    if let Some(station) = spec.station_constraint() {
        return station.to_owned();
    }
    if let Some(kind) = spec.kind_constraint() {
        return title_case(kind);
    }
    if let Some(result) = spec.result_constraint() {
        return format!("For {result}");
    }
    if let Some(materials) = &spec.materials {
        return format!("Made from {}", materials.join(", "));
    }
    "All".to_owned()
}

/// Upper-case the first word character of each whitespace-delimited token
/// and lower-case the rest of the token. Whitespace is preserved as is.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for ch in text.chars() {
        if ch.is_whitespace() {
            in_word = false;
            out.push(ch);
        } else if in_word {
            out.extend(ch.to_lowercase());
        } else if ch.is_alphanumeric() || ch == '_' {
            in_word = true;
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
    }

    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn recipe(result: &str, materials: &[&str], station: &str, kind: &str) -> Recipe {
        Recipe {
            result: result.into(),
            materials: materials.iter().map(ToString::to_string).collect(),
            station: station.into(),
            kind: kind.into(),
        }
    }

    fn catalog() -> Vec<Recipe> {
        vec![
            recipe("Tether", &["Compound"], "Backpack Printer", "printing"),
            recipe("Small Canister", &["Resin"], "Small Printer", "printing"),
            recipe("Copper", &["Malachite"], "Smelting Furnace", "refining"),
            recipe("Medium Battery", &["Lithium", "Zinc"], "Small Printer", "printing"),
            recipe("Rover", &["Aluminum", "Aluminum"], "Medium Printer", "printing"),
            recipe("Plastic", &["Compound", "Carbon"], "Chemistry Lab", "chemistry"),
            recipe("Large Battery", &["Lithium", "Zinc", "Zinc"], "Medium Printer", "printing"),
        ]
    }

    fn results(recipes: &[&Recipe]) -> Vec<String> {
        recipes.iter().map(|r| r.result.clone()).collect()
    }

    // ── apply ────────────────────────────────────────────────────────

    #[test]
    fn empty_spec_is_identity() {
        let all = catalog();
        let filtered = apply(&all, &FilterSpec::all());
        assert_eq!(filtered.len(), all.len());
        assert!(filtered.iter().zip(&all).all(|(a, b)| std::ptr::eq(*a, b)));
    }

    #[test]
    fn station_and_type_match_exactly() {
        let all = catalog();
        assert_eq!(
            results(&apply(&all, &FilterSpec::station("Small Printer"))),
            ["Small Canister", "Medium Battery"]
        );
        assert_eq!(results(&apply(&all, &FilterSpec::kind("refining"))), ["Copper"]);
        assert!(apply(&all, &FilterSpec::station("small printer")).is_empty());
    }

    #[test]
    fn result_matches_exact_name() {
        let all = catalog();
        assert_eq!(results(&apply(&all, &FilterSpec::result("Rover"))), ["Rover"]);
        assert!(apply(&all, &FilterSpec::result("Rov")).is_empty());
    }

    #[test]
    fn materials_require_every_listed_name() {
        let all = catalog();
        assert_eq!(
            results(&apply(&all, &FilterSpec::materials(["Zinc", "Lithium"]))),
            ["Medium Battery", "Large Battery"]
        );
        assert_eq!(
            results(&apply(&all, &FilterSpec::materials(["Compound"]))),
            ["Tether", "Plastic"]
        );
        assert!(apply(&all, &FilterSpec::materials(["Compound", "Zinc"])).is_empty());
    }

    #[test]
    fn materials_order_and_duplicates_are_irrelevant() {
        let all = catalog();
        let a = apply(&all, &FilterSpec::materials(["Lithium", "Zinc"]));
        let b = apply(&all, &FilterSpec::materials(["Zinc", "Zinc", "Lithium"]));
        assert_eq!(results(&a), results(&b));
    }

    #[test]
    fn empty_materials_list_imposes_nothing() {
        let all = catalog();
        let spec = FilterSpec::materials(Vec::<String>::new());
        assert_eq!(apply(&all, &spec).len(), all.len());
    }

    #[test]
    fn set_fields_combine_conjunctively() {
        let all = catalog();
        let spec = FilterSpec {
            station: Some("Medium Printer".into()),
            materials: Some(vec!["Zinc".into()]),
            ..FilterSpec::default()
        };
        assert_eq!(results(&apply(&all, &spec)), ["Large Battery"]);

        let contradictory = FilterSpec {
            station: Some("Small Printer".into()),
            kind: Some("refining".into()),
            ..FilterSpec::default()
        };
        assert!(apply(&all, &contradictory).is_empty());
    }

    #[test]
    fn filter_is_stable() {
        let all = catalog();
        let filtered = apply(&all, &FilterSpec::kind("printing"));
        let positions: Vec<usize> = filtered
            .iter()
            .map(|r| all.iter().position(|x| std::ptr::eq(x, *r)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    // ── titles ───────────────────────────────────────────────────────

    #[test]
    fn titles_follow_priority() {
        assert_eq!(title_for(&FilterSpec::station("Large Printer")), "Large Printer");
        assert_eq!(title_for(&FilterSpec::kind("chemical reaction")), "Chemical Reaction");
        assert_eq!(title_for(&FilterSpec::result("Widget")), "For Widget");
        assert_eq!(title_for(&FilterSpec::materials(["A", "B"])), "Made from A, B");
        assert_eq!(title_for(&FilterSpec::all()), "All");
    }

    #[test]
    fn title_uses_only_first_set_field() {
        let spec = FilterSpec {
            station: Some("Small Printer".into()),
            kind: Some("printing".into()),
            ..FilterSpec::default()
        };
        assert_eq!(title_for(&spec), "Small Printer");

        let spec = FilterSpec {
            result: Some("Rover".into()),
            materials: Some(vec!["Aluminum".into()]),
            ..FilterSpec::default()
        };
        assert_eq!(title_for(&spec), "For Rover");
    }

    #[test]
    fn title_case_tokens() {
        assert_eq!(title_case("REFINING"), "Refining");
        assert_eq!(title_case("chemistry  lab"), "Chemistry  Lab");
        assert_eq!(title_case("(wind) turbine"), "(Wind) Turbine");
        assert_eq!(title_case("tier-two"), "Tier-two");
        assert_eq!(title_case(""), "");
    }

    // ── attribute / query forms ──────────────────────────────────────

    #[test]
    fn json_attribute_form() {
        let spec = FilterSpec::from_json(r#"{"type": "refining"}"#).unwrap();
        assert_eq!(spec, FilterSpec::kind("refining"));
        assert!(FilterSpec::from_json("not json").is_err());
    }

    #[test]
    fn unknown_attribute_keys_are_ignored() {
        let all = catalog();
        let spec = FilterSpec::from_json(r#"{"colour": "red"}"#).unwrap();
        assert!(spec.is_identity());
        assert_eq!(apply(&all, &spec).len(), all.len());
        assert_eq!(title_for(&spec), "All");

        let spec = FilterSpec::from_json(r#"{"station": "Small Printer", "tier": 2}"#).unwrap();
        assert_eq!(spec, FilterSpec::station("Small Printer"));
    }

    #[test]
    fn empty_strings_are_unset() {
        let all = catalog();
        let spec = FilterSpec::from_json(r#"{"station": ""}"#).unwrap();
        assert_eq!(apply(&all, &spec).len(), all.len());
        assert_eq!(title_for(&spec), "All");
        assert!(spec.is_identity());

        let spec = FilterSpec {
            station: Some(String::new()),
            kind: Some("refining".into()),
            result: Some(String::new()),
            ..FilterSpec::default()
        };
        assert_eq!(results(&apply(&all, &spec)), ["Copper"]);
        assert_eq!(title_for(&spec), "Refining");

        let spec = FilterSpec {
            kind: Some(String::new()),
            result: Some("Rover".into()),
            ..FilterSpec::default()
        };
        assert_eq!(title_for(&spec), "For Rover");
    }

    #[test]
    fn query_form() {
        assert!(FilterSpec::parse_query("  ").unwrap().is_identity());
        assert_eq!(FilterSpec::parse_query("Rover").unwrap(), FilterSpec::result("Rover"));
        assert_eq!(
            FilterSpec::parse_query("type: refining").unwrap(),
            FilterSpec::kind("refining")
        );

        let spec = FilterSpec::parse_query("materials: Zinc; material: Lithium").unwrap();
        assert_eq!(spec.materials.unwrap(), ["Zinc", "Lithium"]);

        assert!(matches!(
            FilterSpec::parse_query("colour: red"),
            Err(CoreError::InvalidFilter { .. })
        ));
        assert!(FilterSpec::parse_query("station:").is_err());
    }
}
