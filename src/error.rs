use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::{middleware::validation::FieldError, response::ApiResponse};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),
}

impl AppError {
    pub fn product_not_found() -> Self {
        AppError::NotFound("Product not found".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::OrmError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorData {
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Validation(errors) => {
                let body = ApiResponse::success(
                    "Validation failed",
                    ValidationErrors { errors },
                );
                (status, axum::Json(body)).into_response()
            }
            AppError::NotFound(error) => {
                let body = ApiResponse::success("Not Found", ErrorData { error });
                (status, axum::Json(body)).into_response()
            }
            AppError::BadRequest(error) => {
                let body = ApiResponse::success(
                    format!("Bad Request {error}"),
                    ErrorData { error },
                );
                (status, axum::Json(body)).into_response()
            }
            AppError::OrmError(err) => {
                tracing::error!(error = %err, "database error");
                let body = ApiResponse::success(
                    "Internal Server Error",
                    ErrorData {
                        error: "Internal Server Error".to_string(),
                    },
                );
                (status, axum::Json(body)).into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
