//! Request validation: every user field is required and non-empty.

use crate::error::AppError;
use crate::model::{UserFields, UserPayload};

pub struct RequestValidator;

impl RequestValidator {
    /// Validate a user payload and return the checked fields. Fields are checked in
    /// payload order; the first failure is reported.
    pub fn validate(payload: UserPayload) -> Result<UserFields, AppError> {
        Ok(UserFields {
            name: required("name", payload.name)?,
            location: required("location", payload.location)?,
            title: required("title", payload.title)?,
        })
    }
}

fn required(col: &str, value: Option<String>) -> Result<String, AppError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{} is required", col))),
    }
}
