//! JSON-over-Redis plumbing shared by the repositories, including the
//! cascade deletes between users, venues, bookings and payments.

use std::collections::HashMap;
use std::error::Error;

use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, Pipeline, Script};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::domain::booking::Booking;
use crate::domain::payment::{Payment, PaymentStatus};
use crate::domain::repository::{Page, PageRequest};
use crate::domain::venue::Venue;
use crate::infrastructure::config::redis::{
	BOOKINGS_KEY, PAYMENTS_KEY, booking_key, booking_payments_key, payment_key,
	payments_by_status_key, user_bookings_key, user_payments_key,
	user_venues_key, venue_bookings_key, venue_key,
};

pub fn boxed<E: Error + Send + 'static>(e: E) -> Box<dyn Error + Send> {
	Box::new(e)
}

pub async fn connection(
	client: &Client,
) -> Result<MultiplexedConnection, Box<dyn Error + Send>> {
	client.get_multiplexed_async_connection().await.map_err(boxed)
}

pub fn encode<T: Serialize>(value: &T) -> Result<String, Box<dyn Error + Send>> {
	serde_json::to_string(value).map_err(boxed)
}

pub async fn load<T: DeserializeOwned>(
	con: &mut MultiplexedConnection,
	key: &str,
) -> Result<Option<T>, Box<dyn Error + Send>> {
	let raw: Option<String> = con.get(key).await.map_err(boxed)?;
	raw.map(|json| serde_json::from_str(&json).map_err(boxed))
		.transpose()
}

/// Loads every record whose id is a member of `set_key`. Dangling ids are
/// skipped.
pub async fn load_members<T: DeserializeOwned>(
	con: &mut MultiplexedConnection,
	set_key: &str,
	record_key: fn(&str) -> String,
) -> Result<Vec<T>, Box<dyn Error + Send>> {
	let ids: Vec<String> = con.smembers(set_key).await.map_err(boxed)?;
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let mut pipe = redis::pipe();
	for id in &ids {
		pipe.get(record_key(id));
	}
	let values: Vec<Option<String>> =
		pipe.query_async(con).await.map_err(boxed)?;

	values
		.into_iter()
		.flatten()
		.map(|json| serde_json::from_str(&json).map_err(boxed))
		.collect()
}

pub fn paginate<T, K: Ord>(
	mut records: Vec<T>,
	page: PageRequest,
	sort_key: impl Fn(&T) -> K,
) -> Page<T> {
	records.sort_by_key(|record| sort_key(record));
	let count = records.len();
	let data = records.into_iter().skip(page.skip).take(page.limit).collect();
	Page { data, count }
}

const SAVE_PAYMENT_LUA: &str = r#"
	if redis.call("EXISTS", KEYS[1]) == 0 then
		return 0
	end
	redis.call("SET", KEYS[2], ARGV[1])
	redis.call("SADD", KEYS[3], ARGV[2])
	redis.call("SADD", KEYS[4], ARGV[2])
	redis.call("SADD", KEYS[5], ARGV[2])
	for i = 6, #KEYS - 1 do
		redis.call("SREM", KEYS[i], ARGV[2])
	end
	redis.call("SADD", KEYS[#KEYS], ARGV[2])
	return 1
"#;

/// Writes the payment and its index entries in one step, but only while its
/// booking record exists. Returns false when the booking is gone.
pub async fn save_payment_if_booked(
	con: &mut MultiplexedConnection,
	payment: &Payment,
) -> Result<bool, Box<dyn Error + Send>> {
	let id = payment.id.to_string();
	let script = Script::new(SAVE_PAYMENT_LUA);
	let mut invocation = script.prepare_invoke();
	invocation
		.key(booking_key(payment.booking_id))
		.key(payment_key(&id))
		.key(PAYMENTS_KEY)
		.key(booking_payments_key(payment.booking_id))
		.key(user_payments_key(payment.owner_id));
	for status in PaymentStatus::ALL {
		invocation.key(payments_by_status_key(status.as_str()));
	}
	invocation
		.key(payments_by_status_key(payment.status.as_str()))
		.arg(encode(payment)?)
		.arg(&id);

	let saved: i64 = invocation.invoke_async(con).await.map_err(boxed)?;
	Ok(saved == 1)
}

fn queue_payment_removal(pipe: &mut Pipeline, payment: &Payment) {
	let id = payment.id.to_string();
	pipe.del(payment_key(&id))
		.ignore()
		.srem(PAYMENTS_KEY, &id)
		.ignore()
		.srem(booking_payments_key(payment.booking_id), &id)
		.ignore()
		.srem(user_payments_key(payment.owner_id), &id)
		.ignore();
	for status in PaymentStatus::ALL {
		pipe.srem(payments_by_status_key(status.as_str()), &id)
			.ignore();
	}
}

fn queue_booking_removal(pipe: &mut Pipeline, booking: &Booking) {
	let id = booking.id.to_string();
	pipe.del(booking_key(&id))
		.ignore()
		.srem(BOOKINGS_KEY, &id)
		.ignore()
		.srem(venue_bookings_key(booking.venue_id), &id)
		.ignore()
		.srem(user_bookings_key(booking.owner_id), &id)
		.ignore();
}

fn queue_venue_removal(pipe: &mut Pipeline, venue: &Venue) {
	let id = venue.id.to_string();
	pipe.del(venue_key(&id))
		.ignore()
		.del(venue_bookings_key(&id))
		.ignore()
		.srem(user_venues_key(venue.owner_id), &id)
		.ignore();
}

/// Everything a cascade delete has to remove.
///
/// Bookings, venues and plain keys go first in one atomic pipeline. Payment
/// saves refuse to run once their booking record is gone, so the payments of
/// removed bookings are collected only after that and dropped in a second
/// pipeline.
#[derive(Default)]
pub struct Removal {
	payments: HashMap<Uuid, Payment>,
	bookings: HashMap<Uuid, Booking>,
	venues:   Vec<Venue>,
	keys:     Vec<String>,
}

impl Removal {
	pub fn payment(&mut self, payment: Payment) {
		self.payments.insert(payment.id, payment);
	}

	pub fn key(&mut self, key: String) {
		self.keys.push(key);
	}

	pub fn booking(&mut self, booking: Booking) {
		self.bookings.insert(booking.id, booking);
	}

	pub async fn venue(
		&mut self,
		con: &mut MultiplexedConnection,
		venue: Venue,
	) -> Result<(), Box<dyn Error + Send>> {
		let bookings: Vec<Booking> =
			load_members(con, &venue_bookings_key(venue.id), |id| booking_key(id))
				.await?;
		for booking in bookings {
			self.booking(booking);
		}
		self.venues.push(venue);
		Ok(())
	}

	pub async fn commit(
		mut self,
		con: &mut MultiplexedConnection,
	) -> Result<(), Box<dyn Error + Send>> {
		let mut pipe = redis::pipe();
		pipe.atomic();
		for payment in self.payments.values() {
			queue_payment_removal(&mut pipe, payment);
		}
		for booking in self.bookings.values() {
			queue_booking_removal(&mut pipe, booking);
		}
		for venue in &self.venues {
			queue_venue_removal(&mut pipe, venue);
		}
		for key in &self.keys {
			pipe.del(key).ignore();
		}
		pipe.query_async::<()>(&mut *con).await.map_err(boxed)?;

		if self.bookings.is_empty() {
			return Ok(());
		}

		self.payments.clear();
		for booking_id in self.bookings.keys() {
			let payments: Vec<Payment> = load_members(
				&mut *con,
				&booking_payments_key(booking_id),
				|id| payment_key(id),
			)
			.await?;
			for payment in payments {
				self.payments.insert(payment.id, payment);
			}
		}

		let mut pipe = redis::pipe();
		pipe.atomic();
		for payment in self.payments.values() {
			queue_payment_removal(&mut pipe, payment);
		}
		for booking_id in self.bookings.keys() {
			pipe.del(booking_payments_key(booking_id)).ignore();
		}
		pipe.query_async::<()>(con).await.map_err(boxed)
	}
}
