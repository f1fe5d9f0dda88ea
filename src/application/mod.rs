//! Application services layer.

pub mod error;
pub mod render;
pub mod repos;
pub mod wiki;
pub mod xsrf;
