use contracts::domain::a002_order::aggregate::Order;
use contracts::domain::common::EntityId;

use crate::shared::list_view::{borrowed, ListRecord, ListSchema};

pub const STATUS: &str = "status";
pub const STORE: &str = "store";
pub const UNKNOWN_STORE: &str = "Unknown store";

/// Статусы в порядке выпадающего списка
pub const STATUS_CODES: [&str; 9] = [
    "pending",
    "confirmed",
    "processing",
    "picked_up",
    "ready_for_delivery",
    "out_for_delivery",
    "delivered",
    "cancelled",
    "ready",
];

/// Подпись и css-тон статуса. Неизвестный код показывается как есть.
pub fn status_meta(code: &str) -> (String, &'static str) {
    let (label, tone) = match code {
        "pending" | "pending pickup" => ("Pending", "status-pending"),
        "confirmed" => ("Confirmed", "status-processing"),
        "processing" => ("Processing", "status-processing"),
        "picked_up" => ("Picked Up", "status-processing"),
        "ready_for_delivery" => ("Ready for Delivery", "status-ready"),
        "out_for_delivery" => ("Out for Delivery", "status-ready"),
        "delivered" => ("Delivered", "status-delivered"),
        "cancelled" => ("Canceled", "status-canceled"),
        "ready" => ("Ready for Pickup", "status-ready"),
        "" => ("Unknown", ""),
        other => return (other.to_string(), ""),
    };
    (label.to_string(), tone)
}

/// Заказ, нормализованный для таблицы
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub id: EntityId,
    pub order_id: String,
    pub service_name: String,
    pub store_name: String,
    pub status: String,
    pub pickup_start: Option<String>,
    pub pickup_end: Option<String>,
    pub raw: Order,
}

impl From<Order> for OrderRow {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.clone(),
            order_id: order.id.as_string(),
            service_name: order.service_name(),
            store_name: order.store_name(),
            status: order.status_code(),
            pickup_start: order.pickup_start(),
            pickup_end: order.pickup_end(),
            raw: order,
        }
    }
}

impl ListRecord for OrderRow {
    type Id = EntityId;

    fn record_id(&self) -> EntityId {
        self.id.clone()
    }
}

pub fn order_schema() -> ListSchema<OrderRow> {
    ListSchema::<OrderRow>::new()
        .search("order_id", |o| borrowed(&o.order_id))
        .search("service", |o| borrowed(&o.service_name))
        .search("store", |o| borrowed(&o.store_name))
        .facet(STATUS, |o| borrowed(&o.status))
        .facet(STORE, |o| borrowed(&o.store_name))
}
