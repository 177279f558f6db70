use async_trait::async_trait;
use axum::{
    extract::{FromRequest, Request},
    Form,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// `application/x-www-form-urlencoded` body whose rejection is an
/// `AppError::BadRequest`, so clients always get an `{"error": ...}` body.
pub struct FormFields<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormFields<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state).await.map_err(|e| {
            tracing::warn!("Form rejected: {}", e.body_text());
            AppError::BadRequest(e.body_text())
        })?;
        Ok(FormFields(value))
    }
}
