//! Request extractors that reject with [`crate::error::AppError`].

mod json;
mod path;
pub use json::AppJson;
pub use path::{AppPath, IdPath};
