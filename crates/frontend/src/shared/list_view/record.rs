//! Запись списка и описание её полей для поиска и фасетов.
use std::borrow::Cow;
use std::fmt;
use std::hash::Hash;

use super::error::ListError;

/// Значение поля для точечного патча записи
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Text(String),
    Number(f64),
    Null,
}

impl FieldValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Достаёт bool или возвращает ошибку типа для поля `field`
    pub fn expect_bool(&self, field: &str) -> Result<bool, ListError> {
        self.as_bool().ok_or_else(|| ListError::FieldType {
            field: field.to_string(),
            expected: "boolean",
        })
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

/// Trait для записей, которыми управляет `ListView`
pub trait ListRecord: Clone + PartialEq + fmt::Debug + 'static {
    /// Ключ сверки для upsert/remove/patch
    type Id: Clone + Eq + Hash + fmt::Debug + fmt::Display + 'static;

    fn record_id(&self) -> Self::Id;

    /// Поверхностно записывает одно поле. По умолчанию полей для патча нет.
    fn patch_field(&mut self, field: &str, _value: &FieldValue) -> Result<(), ListError> {
        Err(ListError::UnknownField(field.to_string()))
    }
}

/// Аксессор текстового значения поля; `None` = поле отсутствует
pub type TextAccessor<T> = for<'a> fn(&'a T) -> Option<Cow<'a, str>>;

pub struct SearchField<T> {
    pub name: &'static str,
    pub get: TextAccessor<T>,
}

pub struct Facet<T> {
    pub name: &'static str,
    pub get: TextAccessor<T>,
}

/// Набор полей сущности: по каким ищем подстрокой, по каким фильтруем точно
pub struct ListSchema<T> {
    search: Vec<SearchField<T>>,
    facets: Vec<Facet<T>>,
}

impl<T> Default for ListSchema<T> {
    fn default() -> Self {
        Self {
            search: Vec::new(),
            facets: Vec::new(),
        }
    }
}

impl<T> ListSchema<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, name: &'static str, get: TextAccessor<T>) -> Self {
        self.search.push(SearchField { name, get });
        self
    }

    pub fn facet(mut self, name: &'static str, get: TextAccessor<T>) -> Self {
        self.facets.push(Facet { name, get });
        self
    }

    pub fn search_fields(&self) -> &[SearchField<T>] {
        &self.search
    }

    pub fn facets(&self) -> &[Facet<T>] {
        &self.facets
    }

    pub fn find_facet(&self, name: &str) -> Option<&Facet<T>> {
        self.facets.iter().find(|f| f.name == name)
    }

    /// Уникальные значения фасета в порядке первого появления.
    /// Пустые значения и значения из `exclude` пропускаются.
    pub fn facet_options(&self, records: &[T], facet: &str, exclude: &[&str]) -> Vec<String> {
        let Some(facet) = self.find_facet(facet) else {
            return Vec::new();
        };
        let mut seen: Vec<String> = Vec::new();
        for record in records {
            if let Some(value) = (facet.get)(record) {
                let text: &str = &value;
                if text.is_empty() || exclude.contains(&text) {
                    continue;
                }
                if !seen.iter().any(|s| s == text) {
                    seen.push(text.to_string());
                }
            }
        }
        seen
    }
}

/// Хелпер для аксессоров: заимствует `&str`
pub fn borrowed(value: &str) -> Option<Cow<'_, str>> {
    Some(Cow::Borrowed(value))
}

/// Хелпер для аксессоров над `Option<String>`
pub fn borrowed_opt(value: &Option<String>) -> Option<Cow<'_, str>> {
    value.as_deref().map(Cow::Borrowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::testing::{sample, Item};

    #[test]
    fn test_facet_options_unique_in_order() {
        let records = vec![
            sample(1, "a", "pending"),
            sample(2, "b", "delivered"),
            sample(3, "c", "pending"),
            sample(4, "d", ""),
        ];
        let options = Item::schema().facet_options(&records, "status", &[]);
        assert_eq!(options, vec!["pending".to_string(), "delivered".to_string()]);

        let options = Item::schema().facet_options(&records, "status", &["delivered"]);
        assert_eq!(options, vec!["pending".to_string()]);
    }

    #[test]
    fn test_facet_options_unknown_facet_is_empty() {
        let records = vec![sample(1, "a", "pending")];
        assert!(Item::schema().facet_options(&records, "store", &[]).is_empty());
    }

    #[test]
    fn test_patch_field_type_mismatch() {
        let mut item = sample(1, "a", "pending");
        let err = item.patch_field("vendor", &FieldValue::from("yes")).unwrap_err();
        assert_eq!(
            err,
            ListError::FieldType {
                field: "vendor".into(),
                expected: "boolean"
            }
        );
        assert!(matches!(
            item.patch_field("nope", &FieldValue::Null),
            Err(ListError::UnknownField(_))
        ));
    }
}
