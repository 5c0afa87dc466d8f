//! POS 服务错误

use axum::response::{IntoResponse, Response};
use campus_errors::AppError;
use thiserror::Error;

use crate::domain::PosId;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("POS with ID {0} does not exist")]
    PosNotFound(PosId),

    #[error("POS with name '{0}' does not exist")]
    PosNameNotFound(String),

    #[error("POS with name '{0}' already exists")]
    DuplicatePosName(String),

    #[error("OpenStreetMap node with ID {0} does not exist")]
    OsmNodeNotFound(i64),

    #[error("OpenStreetMap node with ID {node_id} is missing field '{field}'")]
    OsmNodeMissingFields { node_id: i64, field: String },

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Infrastructure(#[from] AppError),
}

impl ServiceError {
    pub fn missing_field(node_id: i64, field: impl Into<String>) -> Self {
        Self::OsmNodeMissingFields {
            node_id,
            field: field.into(),
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::PosNotFound(_)
            | ServiceError::PosNameNotFound(_)
            | ServiceError::OsmNodeNotFound(_) => AppError::NotFound(error.to_string()),
            ServiceError::DuplicatePosName(_) => AppError::Conflict(error.to_string()),
            ServiceError::OsmNodeMissingFields { .. } | ServiceError::Validation(_) => {
                AppError::Validation(error.to_string())
            }
            ServiceError::Infrastructure(e) => e,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
