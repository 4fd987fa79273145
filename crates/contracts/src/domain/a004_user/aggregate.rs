use serde::{Deserialize, Serialize};

use crate::domain::common::EntityId;

/// Клиент сервиса из `/users`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: EntityId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default, rename = "totalOrders")]
    pub total_orders: Option<serde_json::Value>,
}

impl Customer {
    pub fn order_count(&self) -> u64 {
        match &self.total_orders {
            Some(serde_json::Value::Number(n)) => n.as_u64().unwrap_or(0),
            Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }
}
