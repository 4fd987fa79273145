use serde::{Deserialize, Serialize};

use crate::domain::common::EntityId;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(default)]
    pub service: Option<NamedRef>,
    #[serde(default)]
    pub quantity: Option<f64>,
    /// Сервер отдаёт сумму строкой или числом
    #[serde(default)]
    pub total_amount: Option<serde_json::Value>,
}

impl OrderItem {
    pub fn amount(&self) -> f64 {
        match &self.total_amount {
            Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }
}

/// Слот забора вещей в старом формате ответа
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PickupSlot {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// Заказ из `/orders/all`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: EntityId,
    #[serde(default)]
    pub service: Option<NamedRef>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub store: Option<NamedRef>,
    #[serde(default)]
    pub order_status: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub pickup_scheduled_at: Option<String>,
    #[serde(default)]
    pub pickup_slot_end: Option<String>,
    #[serde(default, rename = "pickupSlot")]
    pub pickup_slot: Option<PickupSlot>,
    #[serde(default)]
    pub is_express: bool,
    #[serde(default)]
    pub is_walk_in: bool,
    #[serde(default)]
    pub delivered_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Order {
    /// Имя услуги: явная услуга заказа, иначе первая из позиций с суффиксом "+N"
    pub fn service_name(&self) -> String {
        if let Some(name) = self.service.as_ref().and_then(|s| s.name.as_deref()) {
            if !name.is_empty() {
                return name.to_string();
            }
        }
        let names: Vec<&str> = self
            .items
            .iter()
            .filter_map(|i| i.service.as_ref().and_then(|s| s.name.as_deref()))
            .filter(|n| !n.is_empty())
            .collect();
        match names.as_slice() {
            [] => "Unknown service".to_string(),
            [single] => single.to_string(),
            [first, rest @ ..] => format!("{} +{}", first, rest.len()),
        }
    }

    pub fn store_name(&self) -> String {
        self.store
            .as_ref()
            .and_then(|s| s.name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Unknown store".to_string())
    }

    pub fn status_code(&self) -> String {
        self.order_status
            .clone()
            .or_else(|| self.status.clone())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "unknown".to_string())
    }

    pub fn pickup_start(&self) -> Option<String> {
        self.pickup_scheduled_at
            .clone()
            .or_else(|| self.pickup_slot.as_ref().and_then(|s| s.start.clone()))
    }

    pub fn pickup_end(&self) -> Option<String> {
        self.pickup_slot_end
            .clone()
            .or_else(|| self.pickup_slot.as_ref().and_then(|s| s.end.clone()))
    }

    pub fn total_amount(&self) -> f64 {
        self.items.iter().map(OrderItem::amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(json: &str) -> Order {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_service_name_variants() {
        assert_eq!(
            order(r#"{ "id": 1, "service": { "name": "Dry Cleaning" } }"#).service_name(),
            "Dry Cleaning"
        );
        assert_eq!(
            order(r#"{ "id": 2, "items": [
                { "service": { "name": "Wash" } },
                { "service": { "name": "Iron" } },
                { "service": null }
            ] }"#)
            .service_name(),
            "Wash +1"
        );
        assert_eq!(order(r#"{ "id": 3 }"#).service_name(), "Unknown service");
    }

    #[test]
    fn test_status_and_store_fallbacks() {
        let o = order(r#"{ "id": "A1", "status": "delivered" }"#);
        assert_eq!(o.status_code(), "delivered");
        assert_eq!(o.store_name(), "Unknown store");

        let o = order(r#"{ "id": 5, "order_status": "pending", "status": "delivered" }"#);
        assert_eq!(o.status_code(), "pending");
    }

    #[test]
    fn test_total_amount_accepts_strings_and_numbers() {
        let o = order(r#"{ "id": 9, "items": [
            { "total_amount": "120.50" },
            { "total_amount": 79.5 },
            { "total_amount": "n/a" }
        ] }"#);
        assert!((o.total_amount() - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pickup_slot_legacy_shape() {
        let o = order(r#"{ "id": 4, "pickupSlot": { "start": "2024-05-01T10:00:00Z" } }"#);
        assert_eq!(o.pickup_start().as_deref(), Some("2024-05-01T10:00:00Z"));
        assert_eq!(o.pickup_end(), None);
    }
}
