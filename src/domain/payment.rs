use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
	Pending,
	Paid,
	Cancelled,
	Failed,
}

impl PaymentStatus {
	pub const ALL: [PaymentStatus; 4] = [
		PaymentStatus::Pending,
		PaymentStatus::Paid,
		PaymentStatus::Cancelled,
		PaymentStatus::Failed,
	];

	/// Terminal statuses are never changed by reconciliation.
	pub fn is_terminal(&self) -> bool {
		matches!(self, PaymentStatus::Paid | PaymentStatus::Cancelled)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			PaymentStatus::Pending => "pending",
			PaymentStatus::Paid => "paid",
			PaymentStatus::Cancelled => "cancelled",
			PaymentStatus::Failed => "failed",
		}
	}
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
	Pix,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Payment {
	pub id:         Uuid,
	pub booking_id: Uuid,
	pub owner_id:   Uuid,
	pub method:     PaymentMethod,
	/// Amount in minor units.
	pub value:      i64,
	pub status:     PaymentStatus,
	/// Transaction id of the gateway charge. Set once, at creation.
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub token:      Option<String>,
	pub created_at: DateTime<Utc>,
}
