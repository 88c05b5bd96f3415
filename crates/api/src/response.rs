//! JSON envelope for the `/api/v1` endpoints.

use serde::Serialize;

/// `{ "data": T }`. Errors use [`crate::error::AppError`] instead.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
