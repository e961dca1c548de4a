use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The subset of a user account the booking and payment flows rely on.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct User {
	pub id:           Uuid,
	pub full_name:    Option<String>,
	/// Fiscal identifier (CPF) sent to the gateway as payer metadata.
	pub fiscal_id:    Option<String>,
	pub is_superuser: bool,
}

impl User {
	pub fn can_access(&self, owner_id: Uuid) -> bool {
		self.is_superuser || self.id == owner_id
	}
}
