//! Общий конверт ответа REST API и метаданные пагинации.
use serde::{Deserialize, Serialize};

/// Ответ сервера вида `{ success, data?, message?, pagination? }`.
///
/// Все поля необязательны: часть эндпоинтов отдаёт только `message`
/// (например, ошибки), часть кладёт токен рядом с `data` (логин).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub pagination: Option<PaginationMeta>,
    #[serde(default)]
    pub token: Option<String>,
}

impl<T> Default for ApiEnvelope<T> {
    fn default() -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: None,
            pagination: None,
            token: None,
        }
    }
}

impl<T> ApiEnvelope<T> {
    /// Серверное сообщение: сначала `message`, потом `error`, пустые строки игнорируются
    pub fn server_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.error.as_deref().filter(|m| !m.trim().is_empty()))
    }
}

/// Метаданные пагинации, когда страницы режет сервер
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    #[serde(default = "first_page")]
    pub page: usize,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default = "first_page", alias = "total_pages")]
    pub total_pages: usize,
    #[serde(default, alias = "total_items", alias = "total")]
    pub total_items: usize,
}

fn first_page() -> usize {
    1
}

/// Полезная нагрузка списка: массив или объект, внутри которого массив
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListData<T> {
    Items(Vec<T>),
    Wrapped {
        #[serde(alias = "data", alias = "results", alias = "rows")]
        items: Vec<T>,
        #[serde(default)]
        pagination: Option<PaginationMeta>,
    },
}

impl<T> ListData<T> {
    /// Разбирает обёртку; метаданные из вложенного объекта имеют приоритет
    pub fn into_parts(self) -> (Vec<T>, Option<PaginationMeta>) {
        match self {
            ListData::Items(items) => (items, None),
            ListData::Wrapped { items, pagination } => (items, pagination),
        }
    }
}

/// Параметры запроса страницы (`?page=&limit=`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: usize,
    pub limit: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_pagination() {
        let body = r#"{
            "success": true,
            "data": [1, 2, 3],
            "pagination": { "page": 2, "limit": 10, "totalPages": 4, "totalItems": 37 }
        }"#;
        let env: ApiEnvelope<Vec<i32>> = serde_json::from_str(body).unwrap();
        assert!(env.success);
        assert_eq!(env.data, Some(vec![1, 2, 3]));
        let meta = env.pagination.unwrap();
        assert_eq!(meta.page, 2);
        assert_eq!(meta.total_pages, 4);
        assert_eq!(meta.total_items, 37);
    }

    #[test]
    fn test_server_message_prefers_message_then_error() {
        let env: ApiEnvelope<()> =
            serde_json::from_str(r#"{ "message": "  ", "error": "Invalid token" }"#).unwrap();
        assert_eq!(env.server_message(), Some("Invalid token"));

        let env: ApiEnvelope<()> =
            serde_json::from_str(r#"{ "message": "Store not found", "error": "x" }"#).unwrap();
        assert_eq!(env.server_message(), Some("Store not found"));
    }

    #[test]
    fn test_list_data_plain_and_wrapped() {
        let plain: ListData<i32> = serde_json::from_str("[1,2]").unwrap();
        assert_eq!(plain.into_parts().0, vec![1, 2]);

        let wrapped: ListData<i32> =
            serde_json::from_str(r#"{ "results": [5], "pagination": { "page": 1, "totalPages": 1, "totalItems": 1 } }"#)
                .unwrap();
        let (items, meta) = wrapped.into_parts();
        assert_eq!(items, vec![5]);
        assert_eq!(meta.map(|m| m.total_items), Some(1));
    }
}
