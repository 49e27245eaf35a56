pub mod distinct;
pub mod error;
pub mod histogram;
pub mod year;
