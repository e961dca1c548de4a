use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::booking::Booking;
use crate::domain::payment::{Payment, PaymentStatus};
use crate::domain::user::User;
use crate::domain::venue::Venue;

/// A slice of records plus the total number visible to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
	pub data:  Vec<T>,
	pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
	pub skip:  usize,
	pub limit: usize,
}

impl Default for PageRequest {
	fn default() -> Self {
		Self {
			skip:  0,
			limit: 100,
		}
	}
}

#[async_trait]
pub trait BookingRepository: Send + Sync + 'static {
	async fn save(
		&self,
		booking: Booking,
	) -> Result<(), Box<dyn std::error::Error + Send>>;
	/// Replaces a stored booking, moving it between venue indexes when the
	/// venue changed. Returns false when the booking no longer exists.
	async fn update(
		&self,
		booking: Booking,
	) -> Result<bool, Box<dyn std::error::Error + Send>>;
	async fn find(
		&self,
		id: Uuid,
	) -> Result<Option<Booking>, Box<dyn std::error::Error + Send>>;
	/// Lists bookings, restricted to `owner_id` when given.
	async fn list(
		&self,
		owner_id: Option<Uuid>,
		page: PageRequest,
	) -> Result<Page<Booking>, Box<dyn std::error::Error + Send>>;
	/// Deletes the booking and its payments. Returns whether it existed.
	async fn delete(
		&self,
		id: Uuid,
	) -> Result<bool, Box<dyn std::error::Error + Send>>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync + 'static {
	/// Stores the payment unless its booking has been deleted, in which case
	/// nothing is written and false is returned.
	async fn save(
		&self,
		payment: Payment,
	) -> Result<bool, Box<dyn std::error::Error + Send>>;
	async fn find(
		&self,
		id: Uuid,
	) -> Result<Option<Payment>, Box<dyn std::error::Error + Send>>;
	async fn list(
		&self,
		owner_id: Option<Uuid>,
		page: PageRequest,
	) -> Result<Page<Payment>, Box<dyn std::error::Error + Send>>;
	async fn find_by_status(
		&self,
		status: PaymentStatus,
	) -> Result<Vec<Payment>, Box<dyn std::error::Error + Send>>;
	async fn delete(
		&self,
		id: Uuid,
	) -> Result<bool, Box<dyn std::error::Error + Send>>;
}

#[async_trait]
pub trait VenueRepository: Send + Sync + 'static {
	async fn save(&self, venue: Venue)
	-> Result<(), Box<dyn std::error::Error + Send>>;
	async fn find(
		&self,
		id: Uuid,
	) -> Result<Option<Venue>, Box<dyn std::error::Error + Send>>;
	/// Deletes the venue with its bookings and their payments.
	async fn delete(
		&self,
		id: Uuid,
	) -> Result<bool, Box<dyn std::error::Error + Send>>;
}

#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
	async fn save(&self, user: User) -> Result<(), Box<dyn std::error::Error + Send>>;
	async fn find(
		&self,
		id: Uuid,
	) -> Result<Option<User>, Box<dyn std::error::Error + Send>>;
	/// Deletes the user, their bookings and venues, cascading to payments.
	async fn delete(
		&self,
		id: Uuid,
	) -> Result<bool, Box<dyn std::error::Error + Send>>;
}
