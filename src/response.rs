//! Standard response envelope: `{status, message, data: {data}}`.

use axum::{http::StatusCode, Json};
use serde::Serialize;

pub const MESSAGE_SUCCESS: &str = "success";
pub const MESSAGE_ERROR: &str = "error";

#[derive(Serialize, Debug)]
pub struct Envelope<T> {
    pub status: u16,
    pub message: &'static str,
    pub data: Data<T>,
}

#[derive(Serialize, Debug)]
pub struct Data<T> {
    pub data: T,
}

fn envelope<T: Serialize>(status: StatusCode, message: &'static str, data: T) -> (StatusCode, Json<Envelope<T>>) {
    (
        status,
        Json(Envelope {
            status: status.as_u16(),
            message,
            data: Data { data },
        }),
    )
}

pub fn success_ok<T: Serialize>(data: T) -> (StatusCode, Json<Envelope<T>>) {
    envelope(StatusCode::OK, MESSAGE_SUCCESS, data)
}

pub fn success_created<T: Serialize>(data: T) -> (StatusCode, Json<Envelope<T>>) {
    envelope(StatusCode::CREATED, MESSAGE_SUCCESS, data)
}

pub fn error_envelope(status: StatusCode, message: String) -> (StatusCode, Json<Envelope<String>>) {
    envelope(status, MESSAGE_ERROR, message)
}
