use contracts::domain::a001_store::aggregate::{Store, StorePayload};
use contracts::domain::common::EntityId;
use contracts::shared::api::ListData;

use crate::shared::api_utils::{decode_record, path_id, ApiClient, ApiError};
use crate::shared::list_view::{ListPage, ListView, Loader};

const STORES: &str = "/stores/admin/stores";

fn store_path(id: &EntityId) -> String {
    format!("{}/{}", STORES, path_id(id))
}

/// GET /stores/admin/stores: весь список, страницы режутся на клиенте
pub async fn fetch_stores(client: &ApiClient) -> Result<ListPage<Store>, ApiError> {
    let envelope = client.get::<ListData<Store>>(STORES).await?;
    Ok(ListPage::from(envelope))
}

pub async fn create_store(
    client: &ApiClient,
    payload: &StorePayload,
) -> Result<Option<Store>, ApiError> {
    let envelope = client.post::<_, serde_json::Value>(STORES, payload).await?;
    Ok(decode_record(envelope.data))
}

pub async fn update_store(
    client: &ApiClient,
    id: &EntityId,
    payload: &StorePayload,
) -> Result<Option<Store>, ApiError> {
    let envelope = client
        .put::<_, serde_json::Value>(&store_path(id), payload)
        .await?;
    Ok(decode_record(envelope.data))
}

pub async fn delete_store(client: &ApiClient, id: &EntityId) -> Result<(), ApiError> {
    client
        .delete::<serde_json::Value>(&store_path(id))
        .await
        .map(|_| ())
}

pub fn loader(client: ApiClient) -> Loader<Store> {
    ListView::loader(move |_request| {
        let client = client.clone();
        async move { fetch_stores(&client).await }
    })
}
