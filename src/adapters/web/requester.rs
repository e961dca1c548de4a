use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use log::{error, warn};
use uuid::Uuid;

use crate::adapters::web::errors::ApiError;
use crate::domain::repository::UserRepository;
use crate::domain::user::User;
use crate::infrastructure::persistence::redis_user_repository::RedisUserRepository;

pub const REQUESTER_HEADER: &str = "X-User-Id";

/// The user on whose behalf the request is made, resolved from the
/// `X-User-Id` header set by the authenticating proxy.
#[derive(Debug, Clone)]
pub struct Requester(pub User);

impl FromRequest for Requester {
	type Error = ApiError;
	type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

	fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
		let user_id = req
			.headers()
			.get(REQUESTER_HEADER)
			.and_then(|value| value.to_str().ok())
			.and_then(|value| Uuid::parse_str(value.trim()).ok());
		let user_repo = req.app_data::<web::Data<RedisUserRepository>>().cloned();

		Box::pin(async move {
			let Some(user_id) = user_id else {
				return Err(ApiError::UnauthorizedError);
			};
			let Some(user_repo) = user_repo else {
				error!("User repository is not registered");
				return Err(ApiError::InternalServerError);
			};

			match user_repo.find(user_id).await {
				Ok(Some(user)) => Ok(Requester(user)),
				Ok(None) => {
					warn!("Request from unknown user {user_id}");
					Err(ApiError::UnauthorizedError)
				}
				Err(e) => {
					error!("Failed to load requester {user_id}: {e}");
					Err(ApiError::DatabaseConnectionError)
				}
			}
		})
	}
}
