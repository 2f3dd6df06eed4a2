//! Response envelopes: every success body is a single-key object such as
//! `{"article": {...}}` or `{"comments": [...]}`.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use std::collections::HashMap;

pub type Keyed<T> = (StatusCode, Json<HashMap<&'static str, T>>);

fn keyed<T: Serialize>(status: StatusCode, key: &'static str, data: T) -> Keyed<T> {
    (status, Json(HashMap::from([(key, data)])))
}

pub fn ok<T: Serialize>(key: &'static str, data: T) -> Keyed<T> {
    keyed(StatusCode::OK, key, data)
}

pub fn created<T: Serialize>(key: &'static str, data: T) -> Keyed<T> {
    keyed(StatusCode::CREATED, key, data)
}
