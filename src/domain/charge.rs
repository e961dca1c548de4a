use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Gateway-side lifecycle of a charge, translated from the provider's
/// vocabulary by the gateway adapter.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChargeStatus {
	Active,
	Concluded,
	RemovedByPayer,
	RemovedByProcessor,
	Other(String),
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Payer {
	pub fiscal_id: String,
	pub name:      String,
}

/// Live snapshot of an external charge. Never persisted locally.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Charge {
	pub txid:            String,
	pub status:          ChargeStatus,
	pub created_at:      DateTime<Utc>,
	pub expiration_secs: u64,
	/// Amount in minor units.
	pub amount:          i64,
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub payer:           Option<Payer>,
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub copy_paste:      Option<String>,
}

impl Charge {
	pub fn expires_at(&self) -> DateTime<Utc> {
		let secs = i64::try_from(self.expiration_secs).unwrap_or(i64::MAX);
		self.created_at
			.checked_add_signed(Duration::seconds(secs))
			.unwrap_or(DateTime::<Utc>::MAX_UTC)
	}

	pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
		now > self.expires_at()
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChargeRequest {
	pub expiration_secs: u32,
	pub payer:           Payer,
	/// Amount in minor units.
	pub amount:          i64,
	pub receiving_key:   String,
	pub description:     String,
}
