use serde::{Deserialize, Serialize};

use crate::domain::common::EntityId;

/// Точка приёма (прачечная), как её отдаёт `/stores/admin/stores`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Store {
    /// Значение фасета статуса: "active" / "inactive"
    pub fn status_code(&self) -> &'static str {
        if self.is_active {
            "active"
        } else {
            "inactive"
        }
    }
}

/// Тело POST/PUT для точки. Пароль передаётся только при создании.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorePayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl StorePayload {
    /// Payload для частичного обновления флага активности на основе текущей записи
    pub fn from_store(store: &Store) -> Self {
        Self {
            name: store.name.clone(),
            email: store.email.clone().unwrap_or_default(),
            phone: store.phone.clone().unwrap_or_default(),
            address: store.address.clone().unwrap_or_default(),
            latitude: store.latitude,
            longitude: store.longitude,
            is_active: store.is_active,
            password: None,
        }
    }
}
