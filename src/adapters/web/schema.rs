use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::payment::PaymentStatus;
use crate::domain::repository::{Page, PageRequest};
use crate::domain::reservation::ReservedFor;

const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses an RFC 3339 timestamp, or a naive local one.
pub fn parse_reserved_for(raw: &str) -> Option<ReservedFor> {
	if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
		return Some(ReservedFor::Absolute(instant));
	}
	LOCAL_FORMATS
		.iter()
		.find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
		.map(ReservedFor::Local)
}

fn deserialize_reserved_for<'de, D>(deserializer: D) -> Result<ReservedFor, D::Error>
where
	D: Deserializer<'de>,
{
	let raw = String::deserialize(deserializer)?;
	parse_reserved_for(&raw).ok_or_else(|| {
		serde::de::Error::custom(format!("invalid reservation timestamp '{raw}'"))
	})
}

#[derive(Debug, Deserialize)]
pub struct BookingRequest {
	pub venue_id:     Uuid,
	pub party_size:   u8,
	#[serde(deserialize_with = "deserialize_reserved_for")]
	pub reserved_for: ReservedFor,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaymentRequest {
	pub booking_id: Uuid,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PaymentStatusRequest {
	pub status: PaymentStatus,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PageFilter {
	#[serde(default)]
	pub skip:  Option<usize>,
	#[serde(default)]
	pub limit: Option<usize>,
}

impl From<&PageFilter> for PageRequest {
	fn from(filter: &PageFilter) -> Self {
		let defaults = PageRequest::default();
		PageRequest {
			skip:  filter.skip.unwrap_or(defaults.skip),
			limit: filter.limit.unwrap_or(defaults.limit),
		}
	}
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PageResponse<T> {
	pub data:  Vec<T>,
	pub count: usize,
}

impl<T, U: From<T>> From<Page<T>> for PageResponse<U> {
	fn from(page: Page<T>) -> Self {
		PageResponse {
			data:  page.data.into_iter().map(U::from).collect(),
			count: page.count,
		}
	}
}
