use chrono::Utc;
use log::info;
use uuid::Uuid;

use crate::domain::booking::{self, Booking};
use crate::domain::error::ServiceError;
use crate::domain::repository::{BookingRepository, VenueRepository};
use crate::domain::reservation::ReservationPolicy;
use crate::domain::user::User;
use crate::use_cases::dto::UpdateBookingCommand;

/// Replaces venue, party size and date of an existing booking. Ownership,
/// creation time and the active flag are kept.
#[derive(Clone)]
pub struct UpdateBookingUseCase<B: BookingRepository, V: VenueRepository> {
	booking_repo: B,
	venue_repo:   V,
	policy:       ReservationPolicy,
}

impl<B: BookingRepository, V: VenueRepository> UpdateBookingUseCase<B, V> {
	pub fn new(booking_repo: B, venue_repo: V, policy: ReservationPolicy) -> Self {
		Self {
			booking_repo,
			venue_repo,
			policy,
		}
	}

	pub async fn execute(
		&self,
		requester: &User,
		booking_id: Uuid,
		command: UpdateBookingCommand,
	) -> Result<Booking, ServiceError> {
		let current = self
			.booking_repo
			.find(booking_id)
			.await?
			.ok_or(ServiceError::not_found("Booking"))?;

		let venue = self
			.venue_repo
			.find(command.venue_id)
			.await?
			.ok_or(ServiceError::not_found("Venue"))?;

		if !requester.can_access(current.owner_id) {
			return Err(ServiceError::Permission);
		}

		if !booking::is_valid_party_size(command.party_size) {
			return Err(ServiceError::validation(format!(
				"Party size must be between {} and {}",
				booking::MIN_PARTY_SIZE,
				booking::MAX_PARTY_SIZE
			)));
		}

		let reserved_for = self.policy.accept(Utc::now(), command.reserved_for)?;

		let updated = Booking {
			venue_id: venue.id,
			party_size: command.party_size,
			reserved_for,
			..current.clone()
		};

		if !self.booking_repo.update(updated.clone()).await? {
			return Err(ServiceError::not_found("Booking"));
		}
		if current.venue_id != updated.venue_id {
			info!(
				"Booking {booking_id} moved from venue {} to {}",
				current.venue_id, updated.venue_id
			);
		} else {
			info!("Booking {booking_id} updated by {}", requester.id);
		}

		Ok(updated)
	}
}
