use async_trait::async_trait;
use redis::Client;
use uuid::Uuid;

use crate::domain::payment::{Payment, PaymentStatus};
use crate::domain::repository::{Page, PageRequest, PaymentRepository};
use crate::infrastructure::config::redis::{
	PAYMENTS_KEY, payment_key, payments_by_status_key, user_payments_key,
};
use crate::infrastructure::persistence::redis_store::{
	Removal, connection, load, load_members, paginate, save_payment_if_booked,
};

#[derive(Clone)]
pub struct RedisPaymentRepository {
	client: Client,
}

impl RedisPaymentRepository {
	pub fn new(client: Client) -> Self {
		Self { client }
	}
}

#[async_trait]
impl PaymentRepository for RedisPaymentRepository {
	async fn save(
		&self,
		payment: Payment,
	) -> Result<bool, Box<dyn std::error::Error + Send>> {
		let mut con = connection(&self.client).await?;
		save_payment_if_booked(&mut con, &payment).await
	}

	async fn find(
		&self,
		id: Uuid,
	) -> Result<Option<Payment>, Box<dyn std::error::Error + Send>> {
		let mut con = connection(&self.client).await?;
		load(&mut con, &payment_key(id)).await
	}

	async fn list(
		&self,
		owner_id: Option<Uuid>,
		page: PageRequest,
	) -> Result<Page<Payment>, Box<dyn std::error::Error + Send>> {
		let mut con = connection(&self.client).await?;
		let index = match owner_id {
			Some(owner_id) => user_payments_key(owner_id),
			None => PAYMENTS_KEY.to_string(),
		};
		let payments: Vec<Payment> =
			load_members(&mut con, &index, |id| payment_key(id)).await?;

		Ok(paginate(payments, page, |payment| payment.created_at))
	}

	async fn find_by_status(
		&self,
		status: PaymentStatus,
	) -> Result<Vec<Payment>, Box<dyn std::error::Error + Send>> {
		let mut con = connection(&self.client).await?;
		let payments: Vec<Payment> = load_members(
			&mut con,
			&payments_by_status_key(status.as_str()),
			|id| payment_key(id),
		)
		.await?;

		// Index entries may lag a concurrent status change.
		Ok(payments
			.into_iter()
			.filter(|payment| payment.status == status)
			.collect())
	}

	async fn delete(
		&self,
		id: Uuid,
	) -> Result<bool, Box<dyn std::error::Error + Send>> {
		let mut con = connection(&self.client).await?;
		let Some(payment) = load::<Payment>(&mut con, &payment_key(id)).await?
		else {
			return Ok(false);
		};

		let mut removal = Removal::default();
		removal.payment(payment);
		removal.commit(&mut con).await?;
		Ok(true)
	}
}
