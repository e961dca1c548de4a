use chrono::Utc;
use log::info;
use uuid::Uuid;

use crate::domain::booking::{self, Booking};
use crate::domain::error::ServiceError;
use crate::domain::repository::{BookingRepository, VenueRepository};
use crate::domain::reservation::ReservationPolicy;
use crate::domain::user::User;
use crate::use_cases::dto::CreateBookingCommand;

#[derive(Clone)]
pub struct CreateBookingUseCase<B: BookingRepository, V: VenueRepository> {
	booking_repo: B,
	venue_repo:   V,
	policy:       ReservationPolicy,
}

impl<B: BookingRepository, V: VenueRepository> CreateBookingUseCase<B, V> {
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
		command: CreateBookingCommand,
	) -> Result<Booking, ServiceError> {
		if !booking::is_valid_party_size(command.party_size) {
			return Err(ServiceError::validation(format!(
				"Party size must be between {} and {}",
				booking::MIN_PARTY_SIZE,
				booking::MAX_PARTY_SIZE
			)));
		}

		let venue = self
			.venue_repo
			.find(command.venue_id)
			.await?
			.ok_or(ServiceError::not_found("Venue"))?;

		let now = Utc::now();
		let reserved_for = self.policy.accept(now, command.reserved_for)?;

		let booking = Booking {
			id: Uuid::new_v4(),
			venue_id: venue.id,
			owner_id: requester.id,
			party_size: command.party_size,
			reserved_for,
			active: !venue.charges_for_reservations(),
			created_at: now,
		};

		self.booking_repo.save(booking.clone()).await?;
		info!(
			"Booking {} created for venue {} (active: {})",
			booking.id, venue.id, booking.active
		);

		Ok(booking)
	}
}
