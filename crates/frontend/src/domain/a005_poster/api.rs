use contracts::domain::a005_poster::aggregate::Poster;
use contracts::domain::common::EntityId;
use contracts::shared::api::ListData;
use web_sys::{File, FormData};

use crate::shared::api_utils::{decode_record, path_id, ApiClient, ApiError};
use crate::shared::list_view::{ListPage, ListView, Loader};

const POSTERS: &str = "/posters";

pub async fn fetch_posters(client: &ApiClient) -> Result<ListPage<Poster>, ApiError> {
    let envelope = client.get::<ListData<Poster>>(POSTERS).await?;
    Ok(ListPage::from(envelope))
}

/// POST /posters, multipart с полем `image`
pub async fn create_poster(client: &ApiClient, file: &File) -> Result<Option<Poster>, ApiError> {
    let form = FormData::new()
        .map_err(|_| ApiError::Decode("Unable to prepare upload".to_string()))?;
    form.append_with_blob_and_filename("image", file, &file.name())
        .map_err(|_| ApiError::Decode("Unable to attach image".to_string()))?;
    let envelope = client.post_form::<serde_json::Value>(POSTERS, form).await?;
    Ok(decode_record(envelope.data))
}

pub async fn delete_poster(client: &ApiClient, id: &EntityId) -> Result<(), ApiError> {
    client
        .delete::<serde_json::Value>(&format!("{}/{}", POSTERS, path_id(id)))
        .await
        .map(|_| ())
}

pub fn loader(client: ApiClient) -> Loader<Poster> {
    ListView::loader(move |_request| {
        let client = client.clone();
        async move { fetch_posters(&client).await }
    })
}
