use async_trait::async_trait;
use redis::Client;
use uuid::Uuid;

use crate::domain::repository::VenueRepository;
use crate::domain::venue::Venue;
use crate::infrastructure::config::redis::{user_venues_key, venue_key};
use crate::infrastructure::persistence::redis_store::{
	Removal, boxed, connection, encode, load,
};

#[derive(Clone)]
pub struct RedisVenueRepository {
	client: Client,
}

impl RedisVenueRepository {
	pub fn new(client: Client) -> Self {
		Self { client }
	}
}

#[async_trait]
impl VenueRepository for RedisVenueRepository {
	async fn save(
		&self,
		venue: Venue,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		let mut con = connection(&self.client).await?;
		let id = venue.id.to_string();

		redis::pipe()
			.atomic()
			.set(venue_key(&id), encode(&venue)?)
			.ignore()
			.sadd(user_venues_key(venue.owner_id), &id)
			.ignore()
			.query_async::<()>(&mut con)
			.await
			.map_err(boxed)
	}

	async fn find(
		&self,
		id: Uuid,
	) -> Result<Option<Venue>, Box<dyn std::error::Error + Send>> {
		let mut con = connection(&self.client).await?;
		load(&mut con, &venue_key(id)).await
	}

	async fn delete(
		&self,
		id: Uuid,
	) -> Result<bool, Box<dyn std::error::Error + Send>> {
		let mut con = connection(&self.client).await?;
		let Some(venue) = load::<Venue>(&mut con, &venue_key(id)).await? else {
			return Ok(false);
		};

		let mut removal = Removal::default();
		removal.venue(&mut con, venue).await?;
		removal.commit(&mut con).await?;
		Ok(true)
	}
}
