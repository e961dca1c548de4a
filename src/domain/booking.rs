use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_PARTY_SIZE: u8 = 1;
pub const MAX_PARTY_SIZE: u8 = 20;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Booking {
	pub id:           Uuid,
	pub venue_id:     Uuid,
	pub owner_id:     Uuid,
	pub party_size:   u8,
	pub reserved_for: DateTime<Utc>,
	/// Only flipped on for free venues at creation, or by payment reconciliation.
	pub active:       bool,
	pub created_at:   DateTime<Utc>,
}

pub fn is_valid_party_size(party_size: u8) -> bool {
	(MIN_PARTY_SIZE..=MAX_PARTY_SIZE).contains(&party_size)
}
