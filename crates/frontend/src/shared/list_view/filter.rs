//! Фильтрация списка: поиск подстрокой по нескольким полям плюс точные фасеты.
use std::collections::BTreeMap;

use log::warn;

use super::record::{Facet, ListSchema};

/// Значение фасета, отключающее его ограничение
pub const ALL: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub facets: BTreeMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_facet(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_facet(name, value);
        self
    }

    pub fn set_facet(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.facets.insert(name.into(), value.into());
    }

    /// Выбранное значение фасета; `"all"`, если не выбрано
    pub fn facet(&self, name: &str) -> &str {
        self.facets.get(name).map(String::as_str).unwrap_or(ALL)
    }

    pub fn reset(&mut self) {
        self.query.clear();
        for value in self.facets.values_mut() {
            *value = ALL.to_string();
        }
    }

    /// Есть ли хоть одно действующее ограничение
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty() || self.facets.values().any(|v| v != ALL)
    }
}

/// Подготовленный предикат: запрос нормализован один раз на весь проход
pub struct Predicate<'s, T> {
    needle: Option<String>,
    schema: &'s ListSchema<T>,
    facets: Vec<(&'s Facet<T>, String)>,
}

impl<'s, T> Predicate<'s, T> {
    pub fn new(schema: &'s ListSchema<T>, state: &FilterState) -> Self {
        let needle = state.query.trim().to_lowercase();
        let facets = state
            .facets
            .iter()
            .filter(|(_, value)| value.as_str() != ALL)
            .filter_map(|(name, value)| match schema.find_facet(name) {
                Some(facet) => Some((facet, value.clone())),
                None => {
                    warn!("filter on unknown facet `{}` ignored", name);
                    None
                }
            })
            .collect();
        Self {
            needle: (!needle.is_empty()).then_some(needle),
            schema,
            facets,
        }
    }

    pub fn matches_text(&self, record: &T) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        self.schema.search_fields().iter().any(|field| {
            (field.get)(record)
                .map(|value| value.to_lowercase().contains(needle.as_str()))
                .unwrap_or(false)
        })
    }

    pub fn matches_facets(&self, record: &T) -> bool {
        self.facets.iter().all(|(facet, expected)| {
            let actual = (facet.get)(record);
            actual.as_deref().unwrap_or("") == expected.as_str()
        })
    }

    pub fn matches(&self, record: &T) -> bool {
        self.matches_text(record) && self.matches_facets(record)
    }
}

pub fn matches<T>(record: &T, schema: &ListSchema<T>, state: &FilterState) -> bool {
    Predicate::new(schema, state).matches(record)
}

/// Записи, проходящие текстовый предикат и все активные фасеты (порядок сохраняется)
pub fn filter_records<T: Clone>(
    records: &[T],
    schema: &ListSchema<T>,
    state: &FilterState,
) -> Vec<T> {
    let predicate = Predicate::new(schema, state);
    records
        .iter()
        .filter(|r| predicate.matches(r))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::testing::{generated, sample, Item};

    fn ids(items: &[Item]) -> Vec<i64> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_status_facet_scenario() {
        let records = vec![
            sample(1, "a", "pending"),
            sample(2, "b", "delivered"),
            sample(3, "c", "pending"),
        ];
        let state = FilterState::new().with_facet("status", "pending");
        assert_eq!(ids(&filter_records(&records, &Item::schema(), &state)), vec![1, 3]);
    }

    #[test]
    fn test_empty_and_whitespace_query_match_all() {
        let records = generated(20, 1);
        let schema = Item::schema();
        for query in ["", "   ", "\t\n"] {
            let state = FilterState::new().with_query(query);
            assert_eq!(filter_records(&records, &schema, &state), records);
        }
    }

    #[test]
    fn test_query_is_trimmed_and_case_insensitive_substring() {
        let mut records = vec![sample(1, "Standard Wash & Fold", "pending"), sample(2, "Ironing", "pending")];
        records[1].note = Some("express WASH".into());
        let state = FilterState::new().with_query("  wAsH ");
        assert_eq!(ids(&filter_records(&records, &Item::schema(), &state)), vec![1, 2]);

        let state = FilterState::new().with_query("wash fold");
        assert!(filter_records(&records, &Item::schema(), &state).is_empty());
    }

    #[test]
    fn test_missing_field_never_matches_by_itself() {
        let record = sample(1, "", "pending");
        let state = FilterState::new().with_query("x");
        assert!(!matches(&record, &Item::schema(), &state));
    }

    #[test]
    fn test_facets_are_case_sensitive_and_combined_with_and() {
        let mut records = vec![
            sample(1, "a", "pending"),
            sample(2, "a", "Pending"),
            sample(3, "a", "pending"),
        ];
        records[0].store = Some("North".into());
        records[2].store = Some("South".into());
        let state = FilterState::new()
            .with_facet("status", "pending")
            .with_facet("store", "North");
        assert_eq!(ids(&filter_records(&records, &Item::schema(), &state)), vec![1]);
    }

    #[test]
    fn test_all_sentinel_and_unknown_facet_disable_constraint() {
        let records = generated(15, 3);
        let state = FilterState::new()
            .with_facet("status", ALL)
            .with_facet("colour", "red");
        assert_eq!(filter_records(&records, &Item::schema(), &state), records);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = FilterState::new()
            .with_query("abc")
            .with_facet("status", "pending");
        assert!(state.is_active());
        state.reset();
        assert!(!state.is_active());
        assert_eq!(state.facet("status"), ALL);
        assert_eq!(state.facet("never-set"), ALL);
    }

    fn states() -> Vec<FilterState> {
        let mut out = Vec::new();
        for query in ["", "a", "WASH", "note 3", "zzz"] {
            for status in [ALL, "pending", "Pending"] {
                for store in [ALL, "North", ""] {
                    for vendor in [ALL, "true"] {
                        out.push(
                            FilterState::new()
                                .with_query(query)
                                .with_facet("status", status)
                                .with_facet("store", store)
                                .with_facet("vendor", vendor),
                        );
                    }
                }
            }
        }
        out
    }

    #[test]
    fn test_result_is_exactly_the_matching_records() {
        let schema = Item::schema();
        for seed in 0..5 {
            let records = generated(40, seed);
            for state in states() {
                let predicate = Predicate::new(&schema, &state);
                let result = filter_records(&records, &schema, &state);
                assert!(result.iter().all(|r| predicate.matches(r)));
                let excluded: Vec<&Item> =
                    records.iter().filter(|r| !result.contains(r)).collect();
                assert!(excluded
                    .iter()
                    .all(|r| !predicate.matches_text(r) || !predicate.matches_facets(r)));

                let query = state.query.trim().to_lowercase();
                for r in &result {
                    let text_ok = query.is_empty()
                        || r.name.to_lowercase().contains(&query)
                        || r.note.as_deref().unwrap_or("").to_lowercase().contains(&query);
                    assert!(text_ok);
                    let status = state.facet("status");
                    assert!(status == ALL || r.status == status);
                }
            }
        }
    }

    #[test]
    fn test_filter_is_idempotent() {
        let schema = Item::schema();
        let records = generated(50, 11);
        for state in states() {
            let once = filter_records(&records, &schema, &state);
            let twice = filter_records(&once, &schema, &state);
            assert_eq!(once, twice);
        }
    }
}
