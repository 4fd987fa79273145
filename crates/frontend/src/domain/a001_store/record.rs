use std::cmp::Ordering;

use contracts::domain::a001_store::aggregate::Store;
use contracts::domain::common::EntityId;

use crate::shared::list_view::{borrowed, borrowed_opt, FieldValue, ListError, ListRecord, ListSchema};

pub const IS_ACTIVE: &str = "is_active";
pub const STATUS: &str = "status";

impl ListRecord for Store {
    type Id = EntityId;

    fn record_id(&self) -> EntityId {
        self.id.clone()
    }

    fn patch_field(&mut self, field: &str, value: &FieldValue) -> Result<(), ListError> {
        match field {
            IS_ACTIVE => {
                self.is_active = value.expect_bool(field)?;
                Ok(())
            }
            _ => Err(ListError::UnknownField(field.to_string())),
        }
    }
}

/// Поиск по имени, адресу и email; фасет статуса `active`/`inactive`
pub fn store_schema() -> ListSchema<Store> {
    ListSchema::<Store>::new()
        .search("name", |s| borrowed(&s.name))
        .search("address", |s| borrowed_opt(&s.address))
        .search("email", |s| borrowed_opt(&s.email))
        .facet(STATUS, |s| borrowed(s.status_code()))
}

pub fn by_id(a: &Store, b: &Store) -> Ordering {
    a.id.cmp(&b.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::filter::filter_records;
    use crate::shared::list_view::FilterState;

    fn store(id: i64, name: &str, address: Option<&str>, active: bool) -> Store {
        Store {
            id: EntityId::Int(id),
            name: name.to_string(),
            email: None,
            phone: None,
            address: address.map(str::to_string),
            latitude: None,
            longitude: None,
            is_active: active,
            created_at: None,
        }
    }

    #[test]
    fn test_search_covers_address_and_status_facet() {
        let stores = vec![
            store(1, "Central Wash", Some("12 Baker St"), true),
            store(2, "North", None, false),
            store(3, "Baker Laundry", None, false),
        ];
        let schema = store_schema();

        let state = FilterState::new().with_query("baker");
        let ids: Vec<i64> = filter_records(&stores, &schema, &state)
            .iter()
            .map(|s| match s.id {
                EntityId::Int(v) => v,
                _ => 0,
            })
            .collect();
        assert_eq!(ids, vec![1, 3]);

        let state = FilterState::new().with_query("baker").with_facet(STATUS, "inactive");
        assert_eq!(filter_records(&stores, &schema, &state).len(), 1);
    }

    #[test]
    fn test_patch_active_flag() {
        let mut s = store(1, "Central", None, true);
        s.patch_field(IS_ACTIVE, &FieldValue::Bool(false)).unwrap();
        assert!(!s.is_active);
        assert!(s.patch_field("name", &FieldValue::Bool(true)).is_err());
        assert!(s.patch_field(IS_ACTIVE, &FieldValue::Text("no".into())).is_err());
    }
}
