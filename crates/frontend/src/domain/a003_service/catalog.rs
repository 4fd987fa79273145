//! Прайс-лист услуг. API для услуг пока нет, список встроен в сборку.
use contracts::domain::a003_service::aggregate::Service;
use contracts::domain::common::EntityId;
use futures::future::ready;

use crate::shared::list_view::{ListPage, ListView, Loader};

fn service(id: i64, name: &str, price: f64, last_updated: &str) -> Service {
    Service {
        id: EntityId::Int(id),
        name: name.to_string(),
        price,
        last_updated: Some(last_updated.to_string()),
    }
}

pub fn catalog() -> Vec<Service> {
    vec![
        service(1, "Standard Wash & Fold", 1.75, "2023-10-26"),
        service(2, "Delicate Wash", 2.5, "2023-10-26"),
        service(3, "Dry Cleaning (per item)", 8.0, "2023-10-25"),
        service(4, "Ironing Service", 1.0, "2023-10-24"),
    ]
}

pub fn loader() -> Loader<Service> {
    ListView::loader(|_request| ready(Ok(ListPage::new(catalog()))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::list_view::FetchRequest;
    use futures::executor::block_on;

    #[test]
    fn test_catalog_loads_through_loader() {
        let load = loader();
        let page = block_on(load(FetchRequest { page: 1, limit: 5 })).unwrap();
        assert_eq!(page.records.len(), 4);
        assert_eq!(page.records[2].name, "Dry Cleaning (per item)");
        assert!(page.meta.is_none());
    }
}
