use derive_more::derive::{Display, Error};

use crate::domain::gateway::GatewayError;
use crate::domain::reservation::ReservationRejection;

#[derive(Debug, Display, Error, PartialEq)]
pub enum ServiceError {
	#[display("Invalid request: {reason}")]
	Validation { reason: String },
	#[display("{entity} not found")]
	NotFound { entity: &'static str },
	#[display("Not enough permissions")]
	Permission,
	#[display("Precondition failed: {reason}")]
	Precondition { reason: String },
	#[display("Payment gateway error: {reason}")]
	Gateway { reason: String },
	#[display("Storage error: {reason}")]
	Persistence { reason: String },
}

impl ServiceError {
	pub fn not_found(entity: &'static str) -> Self {
		ServiceError::NotFound { entity }
	}

	pub fn precondition(reason: impl Into<String>) -> Self {
		ServiceError::Precondition {
			reason: reason.into(),
		}
	}

	pub fn validation(reason: impl Into<String>) -> Self {
		ServiceError::Validation {
			reason: reason.into(),
		}
	}
}

impl From<Box<dyn std::error::Error + Send>> for ServiceError {
	fn from(err: Box<dyn std::error::Error + Send>) -> Self {
		ServiceError::Persistence {
			reason: err.to_string(),
		}
	}
}

impl From<GatewayError> for ServiceError {
	fn from(err: GatewayError) -> Self {
		ServiceError::Gateway {
			reason: err.to_string(),
		}
	}
}

impl From<ReservationRejection> for ServiceError {
	fn from(rejection: ReservationRejection) -> Self {
		ServiceError::Validation {
			reason: rejection.to_string(),
		}
	}
}
