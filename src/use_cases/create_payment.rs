use chrono::Utc;
use log::{error, info, warn};
use uuid::Uuid;

use crate::domain::charge::{ChargeRequest, Payer};
use crate::domain::error::ServiceError;
use crate::domain::gateway::ChargeGateway;
use crate::domain::payment::{Payment, PaymentMethod, PaymentStatus};
use crate::domain::repository::{
	BookingRepository, PaymentRepository, VenueRepository,
};
use crate::domain::user::User;
use crate::use_cases::dto::{CreatePaymentCommand, PaymentWithCharge};

/// Parameters of every charge this service issues.
#[derive(Debug, Clone)]
pub struct ChargePolicy {
	pub expiration_secs: u32,
	/// PIX key that receives the funds.
	pub receiving_key:   String,
}

#[derive(Clone)]
pub struct CreatePaymentUseCase<B, V, P, G>
where
	B: BookingRepository,
	V: VenueRepository,
	P: PaymentRepository,
	G: ChargeGateway,
{
	booking_repo: B,
	venue_repo:   V,
	payment_repo: P,
	gateway:      G,
	policy:       ChargePolicy,
}

impl<B, V, P, G> CreatePaymentUseCase<B, V, P, G>
where
	B: BookingRepository,
	V: VenueRepository,
	P: PaymentRepository,
	G: ChargeGateway,
{
	pub fn new(
		booking_repo: B,
		venue_repo: V,
		payment_repo: P,
		gateway: G,
		policy: ChargePolicy,
	) -> Self {
		Self {
			booking_repo,
			venue_repo,
			payment_repo,
			gateway,
			policy,
		}
	}

	pub async fn execute(
		&self,
		requester: &User,
		command: CreatePaymentCommand,
	) -> Result<PaymentWithCharge, ServiceError> {
		let booking = self
			.booking_repo
			.find(command.booking_id)
			.await?
			.ok_or(ServiceError::not_found("Booking"))?;

		if !requester.can_access(booking.owner_id) {
			return Err(ServiceError::Permission);
		}

		let venue = self
			.venue_repo
			.find(booking.venue_id)
			.await?
			.ok_or(ServiceError::not_found("Venue"))?;
		if !venue.charges_for_reservations() {
			return Err(ServiceError::precondition(
				"Venue reservation price is invalid",
			));
		}

		let Some(fiscal_id) = requester
			.fiscal_id
			.as_deref()
			.map(str::trim)
			.filter(|id| !id.is_empty())
		else {
			return Err(ServiceError::precondition("User fiscal id is missing"));
		};
		let Some(full_name) = requester
			.full_name
			.as_deref()
			.map(str::trim)
			.filter(|name| !name.is_empty())
		else {
			return Err(ServiceError::precondition("User full name is missing"));
		};

		let request = ChargeRequest {
			expiration_secs: self.policy.expiration_secs,
			payer:           Payer {
				fiscal_id: fiscal_id.to_string(),
				name:      full_name.to_string(),
			},
			amount:          venue.reservation_price,
			receiving_key:   self.policy.receiving_key.clone(),
			description:     format!("booking in {}", venue.name),
		};

		let charge = self.gateway.create_charge(request).await.map_err(|e| {
			error!("Charge creation failed for booking {}: {e}", booking.id);
			ServiceError::from(e)
		})?;
		if charge.txid.trim().is_empty() {
			error!("Gateway returned a charge without txid for booking {}", booking.id);
			return Err(ServiceError::Gateway {
				reason: "charge has no transaction id".to_string(),
			});
		}

		let payment = Payment {
			id:         Uuid::new_v4(),
			booking_id: booking.id,
			owner_id:   requester.id,
			method:     PaymentMethod::Pix,
			value:      venue.reservation_price,
			status:     PaymentStatus::Pending,
			token:      Some(charge.txid.clone()),
			created_at: Utc::now(),
		};

		if !self.payment_repo.save(payment.clone()).await? {
			warn!(
				"Booking {} was deleted while charge {} was created; the charge is left to expire",
				booking.id, charge.txid
			);
			return Err(ServiceError::not_found("Booking"));
		}
		info!(
			"Payment {} created for booking {} with charge {}",
			payment.id, booking.id, charge.txid
		);

		Ok(PaymentWithCharge {
			payment,
			charge: Some(charge),
		})
	}
}
