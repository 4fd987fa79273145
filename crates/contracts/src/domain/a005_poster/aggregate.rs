use serde::{Deserialize, Serialize};

use crate::domain::common::EntityId;

/// Промо-баннер для мобильного приложения
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poster {
    pub id: EntityId,
    #[serde(default, alias = "imageUrl", alias = "url")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}
