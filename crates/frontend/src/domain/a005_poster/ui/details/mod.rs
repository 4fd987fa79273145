mod view;

pub use view::PosterUpload;
