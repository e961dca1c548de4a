use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Venue {
	pub id:                Uuid,
	pub owner_id:          Uuid,
	pub name:              String,
	/// Price of a reservation in minor units. Zero means reservations are free.
	pub reservation_price: i64,
}

impl Venue {
	pub fn charges_for_reservations(&self) -> bool {
		self.reservation_price > 0
	}
}
