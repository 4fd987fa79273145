use contracts::domain::a003_service::aggregate::Service;
use contracts::domain::common::EntityId;

use crate::shared::list_view::{borrowed, ListRecord, ListSchema};

impl ListRecord for Service {
    type Id = EntityId;

    fn record_id(&self) -> EntityId {
        self.id.clone()
    }
}

pub fn service_schema() -> ListSchema<Service> {
    ListSchema::<Service>::new().search("name", |s| borrowed(&s.name))
}

/// Цена в прайсе: `$8.00`
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Следующий свободный числовой id
pub fn next_id(records: &[Service]) -> EntityId {
    let max = records
        .iter()
        .filter_map(|s| match s.id {
            EntityId::Int(v) => Some(v),
            EntityId::Text(_) => None,
        })
        .max()
        .unwrap_or(0);
    EntityId::Int(max + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_service::catalog::catalog;
    use crate::shared::list_view::filter::filter_records;
    use crate::shared::list_view::FilterState;

    #[test]
    fn test_search_by_name() {
        let found = filter_records(
            &catalog(),
            &service_schema(),
            &FilterState::new().with_query("WASH"),
        );
        let names: Vec<_> = found.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Standard Wash & Fold", "Delicate Wash"]);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1.75), "$1.75");
        assert_eq!(format_price(8.0), "$8.00");
    }

    #[test]
    fn test_next_id() {
        assert_eq!(next_id(&catalog()), EntityId::Int(5));
        assert_eq!(next_id(&[]), EntityId::Int(1));
    }
}
