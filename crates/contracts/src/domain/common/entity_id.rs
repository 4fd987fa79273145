use serde::{Deserialize, Serialize};
use std::fmt;

/// Идентификатор записи, приходящий с сервера.
///
/// API отдаёт `id` то числом, то строкой, поэтому тип принимает оба варианта.
/// Порядок: сначала все числовые (по возрастанию), затем строковые.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Text(String),
}

impl EntityId {
    pub fn as_string(&self) -> String {
        self.to_string()
    }
}

impl Default for EntityId {
    fn default() -> Self {
        EntityId::Int(0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Int(v) => write!(f, "{}", v),
            EntityId::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        EntityId::Int(value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        EntityId::Text(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        EntityId::Text(value)
    }
}
