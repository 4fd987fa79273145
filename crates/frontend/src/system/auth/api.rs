use contracts::shared::api::ApiEnvelope;
use contracts::system::auth::{AdminUser, LoginRequest};
use log::info;

use crate::shared::api_utils::{ApiClient, ApiError};

/// Токен и пользователь из ответа login.
/// Успешный ответ без данных пользователя считается отказом.
pub fn session_from(
    envelope: ApiEnvelope<AdminUser>,
    fallback: &str,
) -> Result<(Option<String>, AdminUser), ApiError> {
    let message = envelope.server_message().map(str::to_string);
    match envelope.data {
        Some(user) => Ok((envelope.token.filter(|t| !t.is_empty()), user)),
        None => Err(ApiError::Rejected(
            message.unwrap_or_else(|| fallback.to_string()),
        )),
    }
}

fn store_session(client: &ApiClient, token: Option<String>, user: &AdminUser) {
    if let Some(token) = token.as_deref() {
        client.tokens().set_access_token(Some(token));
        client.tokens().set_stored_user(Some(user));
    }
}

/// POST /admin/login
pub async fn login(
    client: &ApiClient,
    email: String,
    password: String,
) -> Result<AdminUser, ApiError> {
    let request = LoginRequest { email, password };
    let envelope = client.post::<_, AdminUser>("/admin/login", &request).await?;
    let (token, user) = session_from(envelope, "Login failed")?;
    store_session(client, token, &user);
    info!("signed in as {}", user.display_name());
    Ok(user)
}

/// GET /admin/profile
pub async fn profile(client: &ApiClient) -> Result<Option<AdminUser>, ApiError> {
    Ok(client.get::<AdminUser>("/admin/profile").await?.data)
}

/// Выход только на клиенте: сервер не уведомляется
pub fn logout(client: &ApiClient) {
    client.tokens().clear();
    info!("signed out");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api_utils::parse_response;

    #[test]
    fn test_session_from_login_response() {
        let envelope = parse_response::<AdminUser>(
            200,
            r#"{"success": true, "token": "jwt", "data": {"id": 1, "name": "Root", "email": "root@example.com"}}"#,
        )
        .unwrap();
        let (token, user) = session_from(envelope, "Login failed").unwrap();
        assert_eq!(token.as_deref(), Some("jwt"));
        assert_eq!(user.display_name(), "Root");
    }

    #[test]
    fn test_session_without_user_is_rejected() {
        let envelope = parse_response::<AdminUser>(200, r#"{"success": true}"#).unwrap();
        assert_eq!(
            session_from(envelope, "Login failed").unwrap_err(),
            ApiError::Rejected("Login failed".to_string())
        );
    }
}
