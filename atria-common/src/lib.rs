pub mod color;
pub mod config;
pub mod time;
pub mod value;
