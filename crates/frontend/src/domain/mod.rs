pub mod a001_store;
pub mod a002_order;
pub mod a003_service;
pub mod a004_user;
pub mod a005_poster;
