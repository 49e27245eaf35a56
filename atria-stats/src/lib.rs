pub mod category;
pub mod summary;
