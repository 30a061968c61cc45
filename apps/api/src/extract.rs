use axum::extract::FromRequest;

use crate::errors::AppError;

/// `Json` extractor whose rejections render through `AppError`, so malformed
/// bodies and unknown enum values answer with the standard error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
