//! JSON body extractor whose rejections use the error envelope.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// Like [`axum::Json`], but a body that fails to decode produces a 400 envelope
/// carrying the decode error. A body that cannot be read (e.g. over the size limit)
/// keeps the status axum assigns it.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Payload(value)),
            Err(JsonRejection::BytesRejection(rejection)) => Err(AppError::Rejected {
                status: rejection.status(),
                message: rejection.body_text(),
            }),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}
