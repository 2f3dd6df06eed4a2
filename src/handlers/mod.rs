//! HTTP handlers: parse and validate the request, call the repository, shape the envelope.

pub mod api;
pub mod articles;
pub mod comments;
pub mod topics;
pub mod users;
