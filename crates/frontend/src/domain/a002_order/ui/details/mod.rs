//! Order Details UI Module
//!
//! - model.rs: строки карточки заказа
//! - view.rs: модалка просмотра

mod model;
mod view;

pub use model::{detail_lines, format_rupees};
pub use view::OrderDetails;
