use uuid::Uuid;

use crate::domain::booking::Booking;
use crate::domain::error::ServiceError;
use crate::domain::repository::{BookingRepository, Page, PageRequest};
use crate::domain::user::User;

#[derive(Clone)]
pub struct QueryBookingsUseCase<B: BookingRepository> {
	booking_repo: B,
}

impl<B: BookingRepository> QueryBookingsUseCase<B> {
	pub fn new(booking_repo: B) -> Self {
		Self { booking_repo }
	}

	pub async fn get(
		&self,
		requester: &User,
		booking_id: Uuid,
	) -> Result<Booking, ServiceError> {
		let booking = self
			.booking_repo
			.find(booking_id)
			.await?
			.ok_or(ServiceError::not_found("Booking"))?;

		if !requester.can_access(booking.owner_id) {
			return Err(ServiceError::Permission);
		}

		Ok(booking)
	}

	pub async fn list(
		&self,
		requester: &User,
		page: PageRequest,
	) -> Result<Page<Booking>, ServiceError> {
		let owner = (!requester.is_superuser).then_some(requester.id);
		Ok(self.booking_repo.list(owner, page).await?)
	}
}
