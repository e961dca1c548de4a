use async_trait::async_trait;
use log::debug;
use redis::{AsyncCommands, Client, Script};
use uuid::Uuid;

use crate::domain::booking::Booking;
use crate::domain::repository::{BookingRepository, Page, PageRequest};
use crate::infrastructure::config::redis::{
	BOOKINGS_KEY, booking_key, user_bookings_key, venue_bookings_key,
};
use crate::infrastructure::persistence::redis_store::{
	Removal, boxed, connection, encode, load, load_members, paginate,
};

const UPDATE_ATTEMPTS: usize = 5;

const UPDATE_BOOKING_LUA: &str = r#"
	local current = redis.call("GET", KEYS[1])
	if not current then
		return 0
	end
	if current ~= ARGV[1] then
		return -1
	end
	redis.call("SET", KEYS[1], ARGV[2])
	redis.call("SREM", KEYS[2], ARGV[3])
	redis.call("SADD", KEYS[3], ARGV[3])
	return 1
"#;

#[derive(Clone)]
pub struct RedisBookingRepository {
	client: Client,
}

impl RedisBookingRepository {
	pub fn new(client: Client) -> Self {
		Self { client }
	}
}

#[async_trait]
impl BookingRepository for RedisBookingRepository {
	async fn save(
		&self,
		booking: Booking,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		let mut con = connection(&self.client).await?;
		let id = booking.id.to_string();

		redis::pipe()
			.atomic()
			.set(booking_key(&id), encode(&booking)?)
			.ignore()
			.sadd(BOOKINGS_KEY, &id)
			.ignore()
			.sadd(venue_bookings_key(booking.venue_id), &id)
			.ignore()
			.sadd(user_bookings_key(booking.owner_id), &id)
			.ignore()
			.query_async::<()>(&mut con)
			.await
			.map_err(boxed)
	}

	async fn update(
		&self,
		booking: Booking,
	) -> Result<bool, Box<dyn std::error::Error + Send>> {
		let mut con = connection(&self.client).await?;
		let id = booking.id.to_string();
		let script = Script::new(UPDATE_BOOKING_LUA);
		let json = encode(&booking)?;

		// Compare-and-set against the record read here; a concurrent writer
		// makes the script answer -1 and the read is repeated.
		for attempt in 1..=UPDATE_ATTEMPTS {
			let raw: Option<String> =
				con.get(booking_key(&id)).await.map_err(boxed)?;
			let Some(raw) = raw else {
				return Ok(false);
			};
			let current: Booking = serde_json::from_str(&raw).map_err(boxed)?;

			let outcome: i64 = script
				.key(booking_key(&id))
				.key(venue_bookings_key(current.venue_id))
				.key(venue_bookings_key(booking.venue_id))
				.arg(&raw)
				.arg(&json)
				.arg(&id)
				.invoke_async(&mut con)
				.await
				.map_err(boxed)?;

			match outcome {
				1 => return Ok(true),
				0 => return Ok(false),
				_ => debug!("Booking {id} changed while updating (attempt {attempt})"),
			}
		}

		Err(boxed(redis::RedisError::from((
			redis::ErrorKind::TryAgain,
			"booking kept changing during update",
		))))
	}

	async fn find(
		&self,
		id: Uuid,
	) -> Result<Option<Booking>, Box<dyn std::error::Error + Send>> {
		let mut con = connection(&self.client).await?;
		load(&mut con, &booking_key(id)).await
	}

	async fn list(
		&self,
		owner_id: Option<Uuid>,
		page: PageRequest,
	) -> Result<Page<Booking>, Box<dyn std::error::Error + Send>> {
		let mut con = connection(&self.client).await?;
		let index = match owner_id {
			Some(owner_id) => user_bookings_key(owner_id),
			None => BOOKINGS_KEY.to_string(),
		};
		let bookings: Vec<Booking> =
			load_members(&mut con, &index, |id| booking_key(id)).await?;

		Ok(paginate(bookings, page, |booking| booking.created_at))
	}

	async fn delete(
		&self,
		id: Uuid,
	) -> Result<bool, Box<dyn std::error::Error + Send>> {
		let mut con = connection(&self.client).await?;
		let Some(booking) = load::<Booking>(&mut con, &booking_key(id)).await?
		else {
			return Ok(false);
		};

		let mut removal = Removal::default();
		removal.booking(booking);
		removal.commit(&mut con).await?;
		Ok(true)
	}
}
