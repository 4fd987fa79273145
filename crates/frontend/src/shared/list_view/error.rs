use thiserror::Error;

/// Ошибки локальных операций над коллекцией (не сетевые)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("field `{field}` expects a {expected} value")]
    FieldType {
        field: String,
        expected: &'static str,
    },
}
