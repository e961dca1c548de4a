use async_trait::async_trait;
use redis::Client;
use uuid::Uuid;

use crate::domain::booking::Booking;
use crate::domain::payment::Payment;
use crate::domain::repository::UserRepository;
use crate::domain::user::User;
use crate::domain::venue::Venue;
use crate::infrastructure::config::redis::{
	booking_key, payment_key, user_bookings_key, user_key, user_payments_key,
	user_venues_key, venue_key,
};
use crate::infrastructure::persistence::redis_store::{
	Removal, boxed, connection, encode, load, load_members,
};

#[derive(Clone)]
pub struct RedisUserRepository {
	client: Client,
}

impl RedisUserRepository {
	pub fn new(client: Client) -> Self {
		Self { client }
	}
}

#[async_trait]
impl UserRepository for RedisUserRepository {
	async fn save(&self, user: User) -> Result<(), Box<dyn std::error::Error + Send>> {
		use redis::AsyncCommands;

		let mut con = connection(&self.client).await?;
		con.set::<_, _, ()>(user_key(user.id), encode(&user)?)
			.await
			.map_err(boxed)
	}

	async fn find(
		&self,
		id: Uuid,
	) -> Result<Option<User>, Box<dyn std::error::Error + Send>> {
		let mut con = connection(&self.client).await?;
		load(&mut con, &user_key(id)).await
	}

	async fn delete(
		&self,
		id: Uuid,
	) -> Result<bool, Box<dyn std::error::Error + Send>> {
		let mut con = connection(&self.client).await?;
		if load::<User>(&mut con, &user_key(id)).await?.is_none() {
			return Ok(false);
		}

		let mut removal = Removal::default();

		let venues: Vec<Venue> =
			load_members(&mut con, &user_venues_key(id), |member| venue_key(member)).await?;
		for venue in venues {
			removal.venue(&mut con, venue).await?;
		}

		let bookings: Vec<Booking> =
			load_members(&mut con, &user_bookings_key(id), |member| booking_key(member))
				.await?;
		for booking in bookings {
			removal.booking(booking);
		}

		let payments: Vec<Payment> =
			load_members(&mut con, &user_payments_key(id), |member| payment_key(member))
				.await?;
		for payment in payments {
			removal.payment(payment);
		}

		removal.key(user_key(id));
		removal.key(user_venues_key(id));
		removal.key(user_bookings_key(id));
		removal.key(user_payments_key(id));
		removal.commit(&mut con).await?;
		Ok(true)
	}
}
