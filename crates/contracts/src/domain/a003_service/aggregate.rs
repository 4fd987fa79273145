use serde::{Deserialize, Serialize};

use crate::domain::common::EntityId;

/// Услуга прачечной и её цена
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: EntityId,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub last_updated: Option<String>,
}
