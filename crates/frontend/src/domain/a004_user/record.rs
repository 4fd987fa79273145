use contracts::domain::a004_user::aggregate::Customer;
use contracts::domain::common::EntityId;

use crate::shared::date_utils::NO_VALUE;
use crate::shared::list_view::{borrowed_opt, ListRecord, ListSchema};

impl ListRecord for Customer {
    type Id = EntityId;

    fn record_id(&self) -> EntityId {
        self.id.clone()
    }
}

/// Поиск по загруженной странице: имя, email, телефон
pub fn customer_schema() -> ListSchema<Customer> {
    ListSchema::<Customer>::new()
        .search("name", |c| borrowed_opt(&c.name))
        .search("email", |c| borrowed_opt(&c.email))
        .search("phone_number", |c| borrowed_opt(&c.phone_number))
}

pub fn text_or_dash(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NO_VALUE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::filter::filter_records;
    use crate::shared::list_view::FilterState;

    fn customers() -> Vec<Customer> {
        serde_json::from_str(
            r#"[
                { "id": 1, "name": "Asha Rao", "email": "asha@example.com", "phone_number": "98450 11111", "totalOrders": 4 },
                { "id": 2, "name": null, "email": "ravi@example.com", "phone_number": "99000 22222", "totalOrders": "2" },
                { "id": 3, "name": "Meera", "email": null }
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_search_over_name_email_phone() {
        let schema = customer_schema();
        let by_phone = filter_records(&customers(), &schema, &FilterState::new().with_query("99000"));
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].id, EntityId::Int(2));

        let by_email = filter_records(&customers(), &schema, &FilterState::new().with_query("EXAMPLE"));
        assert_eq!(by_email.len(), 2);

        let by_name = filter_records(&customers(), &schema, &FilterState::new().with_query("meera"));
        assert_eq!(by_name[0].id, EntityId::Int(3));
    }

    #[test]
    fn test_order_count_and_placeholders() {
        let list = customers();
        assert_eq!(list[0].order_count(), 4);
        assert_eq!(list[1].order_count(), 2);
        assert_eq!(list[2].order_count(), 0);
        assert_eq!(text_or_dash(&list[1].name), NO_VALUE);
    }
}
