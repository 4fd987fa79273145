//! Store Details UI Module
//!
//! - model.rs: form state and validation
//! - view.rs: Leptos component (create/edit modal)

mod model;
mod view;

pub use model::StoreForm;
pub use view::StoreDetails;
