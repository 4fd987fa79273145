//! API utilities for frontend-backend communication
//!
//! Base URL resolution, the shared error type and a thin client over
//! `gloo-net` that attaches the bearer token and unwraps the response envelope.
use std::rc::Rc;

use contracts::shared::api::ApiEnvelope;
use gloo_net::http::{Request, RequestBuilder};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::shared::config::ApiConfig;
use crate::system::auth::storage::TokenStore;

pub const NETWORK_ERROR: &str = "Network error. Please check your connection.";

/// Get the base URL for API requests
///
/// Uses `base_url` from configuration when set, otherwise the current
/// window location with the configured port and prefix.
///
/// # Example
/// ```rust,ignore
/// let url = format!("{}/stores/admin/stores", api_base(&config.api));
/// ```
pub fn api_base(config: &ApiConfig) -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return config.base_for("http:", "127.0.0.1"),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    config.base_for(&protocol, &hostname)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Запрос не дошёл до сервера
    #[error("{0}")]
    Network(String),

    #[error("{message} (HTTP {status})")]
    Http { status: u16, message: String },

    /// Сервер ответил `success: false`
    #[error("{0}")]
    Rejected(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Текст для пользователя: сообщение сервера, иначе `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        let text = match self {
            ApiError::Network(message) => message.as_str(),
            ApiError::Http { message, .. } => message.as_str(),
            ApiError::Rejected(message) => message.as_str(),
            ApiError::Decode(_) => "",
        };
        if text.trim().is_empty() {
            fallback.to_string()
        } else {
            text.to_string()
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

fn text_field<'a>(value: &'a serde_json::Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

/// Разбор ответа сервера по статусу и телу.
///
/// Тело не JSON - его текст становится `message`. Не-2xx - `ApiError::Http`
/// с `message`, `error` или "Request failed with status N". Явный
/// `"success": false` - `ApiError::Rejected`.
pub fn parse_response<T: DeserializeOwned>(
    status: u16,
    body: &str,
) -> Result<ApiEnvelope<T>, ApiError> {
    let fallback = format!("Request failed with status {}", status);
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => {
            let message = if body.trim().is_empty() {
                fallback.clone()
            } else {
                body.to_string()
            };
            serde_json::json!({ "message": message })
        }
    };

    if !(200..300).contains(&status) {
        let message = text_field(&value, "message")
            .or_else(|| text_field(&value, "error"))
            .map(str::to_string)
            .unwrap_or(fallback);
        return Err(ApiError::Http { status, message });
    }

    if value.get("success") == Some(&serde_json::Value::Bool(false)) {
        let message = text_field(&value, "message")
            .or_else(|| text_field(&value, "error"))
            .unwrap_or("")
            .to_string();
        return Err(ApiError::Rejected(message));
    }

    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// HTTP-клиент админки. Токен берётся через `TokenStore` на каждый запрос.
#[derive(Clone)]
pub struct ApiClient {
    base: String,
    tokens: Rc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base: impl Into<String>, tokens: Rc<dyn TokenStore>) -> Self {
        Self {
            base: base.into(),
            tokens,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn tokens(&self) -> &Rc<dyn TokenStore> {
        &self.tokens
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.tokens.access_token() {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(
        request: Result<Request, gloo_net::Error>,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let request = request.map_err(|e| ApiError::Decode(e.to_string()))?;
        debug!("request {}", request.url());
        let response = request.send().await.map_err(|e| {
            warn!("request failed: {}", e);
            ApiError::Network(NETWORK_ERROR.to_string())
        })?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        parse_response(status, &body)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiEnvelope<T>, ApiError> {
        let builder = self.authorized(Request::get(&self.url(path)));
        Self::execute(builder.build()).await
    }

    /// GET без заголовка Authorization
    pub async fn get_public<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        Self::execute(Request::get(&self.url(path)).build()).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let builder = self.authorized(Request::post(&self.url(path)));
        Self::execute(builder.json(body)).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let builder = self.authorized(Request::put(&self.url(path)));
        Self::execute(builder.json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let builder = self.authorized(Request::delete(&self.url(path)));
        Self::execute(builder.build()).await
    }

    /// POST multipart-формы (загрузка файлов)
    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: web_sys::FormData,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let builder = self.authorized(Request::post(&self.url(path)));
        Self::execute(builder.body(form)).await
    }
}

/// Запись из `data` ответа мутации. Ответ другой формы означает "записи нет",
/// а не ошибку: сервер операцию уже выполнил.
pub fn decode_record<T: DeserializeOwned>(data: Option<serde_json::Value>) -> Option<T> {
    let value = data?;
    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(e) => {
            debug!("response data is not a record: {}", e);
            None
        }
    }
}

/// Кодирует id для подстановки в путь
pub fn path_id(id: &impl std::fmt::Display) -> String {
    urlencoding::encode(&id.to_string()).into_owned()
}
