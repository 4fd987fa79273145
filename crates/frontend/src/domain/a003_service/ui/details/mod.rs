mod model;
mod view;

pub use model::ServiceForm;
pub use view::ServiceDetails;
