use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, error};
use derive_more::derive::{Display, Error};
use serde::Serialize;

use crate::domain::error::ServiceError;

#[derive(Serialize)]
struct ErrorResponse {
	#[serde(rename = "statusCode")]
	status_code: u16,
	error:       String,
	message:     String,
}

#[derive(Debug, Display, Error)]
pub enum ApiError {
	#[display("{message}")]
	BadClientDataError { message: String },
	#[display("Missing or unknown requester.")]
	UnauthorizedError,
	#[display("Not enough permissions.")]
	ForbiddenError,
	#[display("{message}")]
	NotFoundError { message: String },
	#[display("{message}")]
	GatewayError { message: String },
	#[display("Could not access the database.")]
	DatabaseConnectionError,
	#[display("Internal server error.")]
	InternalServerError,
}

impl ApiError {
	pub fn name(&self) -> String {
		match self {
			ApiError::BadClientDataError { .. } => "Bad request".to_string(),
			ApiError::UnauthorizedError => "Unauthorized".to_string(),
			ApiError::ForbiddenError => "Forbidden".to_string(),
			ApiError::NotFoundError { .. } => "Not found".to_string(),
			ApiError::GatewayError { .. } => "Bad Gateway".to_string(),
			ApiError::DatabaseConnectionError => "Insufficient Storage".to_string(),
			ApiError::InternalServerError => "Internal Server Error".to_string(),
		}
	}
}

impl error::ResponseError for ApiError {
	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code())
			.content_type(ContentType::json())
			.json(ErrorResponse {
				status_code: self.status_code().as_u16(),
				error:       self.to_string(),
				message:     self.name(),
			})
	}

	fn status_code(&self) -> StatusCode {
		match self {
			ApiError::BadClientDataError { .. } => StatusCode::BAD_REQUEST,
			ApiError::UnauthorizedError => StatusCode::UNAUTHORIZED,
			ApiError::ForbiddenError => StatusCode::FORBIDDEN,
			ApiError::NotFoundError { .. } => StatusCode::NOT_FOUND,
			ApiError::GatewayError { .. } => StatusCode::BAD_GATEWAY,
			ApiError::DatabaseConnectionError => StatusCode::INSUFFICIENT_STORAGE,
			ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		match err {
			ServiceError::Validation { .. } | ServiceError::Precondition { .. } => {
				ApiError::BadClientDataError {
					message: err.to_string(),
				}
			}
			ServiceError::NotFound { .. } => ApiError::NotFoundError {
				message: err.to_string(),
			},
			ServiceError::Permission => ApiError::ForbiddenError,
			ServiceError::Gateway { .. } => ApiError::GatewayError {
				message: err.to_string(),
			},
			ServiceError::Persistence { .. } => ApiError::DatabaseConnectionError,
		}
	}
}
