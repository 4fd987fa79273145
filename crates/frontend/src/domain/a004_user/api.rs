use contracts::domain::a004_user::aggregate::Customer;
use contracts::shared::api::{ListData, PageQuery};

use crate::shared::api_utils::{ApiClient, ApiError};
use crate::shared::list_view::{FetchRequest, ListPage, ListView, Loader};

/// `/users?page=2&limit=10`
pub fn users_path(request: FetchRequest) -> String {
    let query = PageQuery {
        page: request.page,
        limit: request.limit,
    };
    match serde_qs::to_string(&query) {
        Ok(qs) => format!("/users?{}", qs),
        Err(_) => "/users".to_string(),
    }
}

/// GET /users: страница клиентов и метаданные пагинации
pub async fn fetch_users(
    client: &ApiClient,
    request: FetchRequest,
) -> Result<ListPage<Customer>, ApiError> {
    let envelope = client.get::<ListData<Customer>>(&users_path(request)).await?;
    if envelope.data.is_none() {
        return Err(ApiError::Rejected(
            "Unable to load users right now.".to_string(),
        ));
    }
    Ok(ListPage::from(envelope))
}

pub fn loader(client: ApiClient) -> Loader<Customer> {
    ListView::loader(move |request| {
        let client = client.clone();
        async move { fetch_users(&client, request).await }
    })
}
