use log::info;
use uuid::Uuid;

use crate::domain::error::ServiceError;
use crate::domain::repository::BookingRepository;
use crate::domain::user::User;

#[derive(Clone)]
pub struct DeleteBookingUseCase<B: BookingRepository> {
	booking_repo: B,
}

impl<B: BookingRepository> DeleteBookingUseCase<B> {
	pub fn new(booking_repo: B) -> Self {
		Self { booking_repo }
	}

	pub async fn execute(
		&self,
		requester: &User,
		booking_id: Uuid,
	) -> Result<(), ServiceError> {
		let booking = self
			.booking_repo
			.find(booking_id)
			.await?
			.ok_or(ServiceError::not_found("Booking"))?;

		if !requester.can_access(booking.owner_id) {
			return Err(ServiceError::Permission);
		}

		self.booking_repo.delete(booking_id).await?;
		info!("Booking {booking_id} deleted with its payments");
		Ok(())
	}
}
