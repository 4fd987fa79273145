use contracts::domain::a002_order::aggregate::Order;
use contracts::shared::api::ListData;

use super::record::OrderRow;
use crate::shared::api_utils::{ApiClient, ApiError};
use crate::shared::list_view::{ListPage, ListView, Loader};

/// GET /orders/all, без авторизации
pub async fn fetch_orders(client: &ApiClient) -> Result<ListPage<OrderRow>, ApiError> {
    let envelope = client.get_public::<ListData<Order>>("/orders/all").await?;
    let page = ListPage::from(envelope);
    Ok(ListPage::with_meta(
        page.records.into_iter().map(OrderRow::from).collect(),
        page.meta,
    ))
}

pub fn loader(client: ApiClient) -> Loader<OrderRow> {
    ListView::loader(move |_request| {
        let client = client.clone();
        async move { fetch_orders(&client).await }
    })
}
