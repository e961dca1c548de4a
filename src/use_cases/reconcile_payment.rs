use chrono::Utc;
use log::{info, warn};

use crate::domain::error::ServiceError;
use crate::domain::gateway::ChargeGateway;
use crate::domain::payment::Payment;
use crate::domain::reconciliation;
use crate::domain::repository::{BookingRepository, PaymentRepository};
use crate::use_cases::dto::PaymentWithCharge;

/// Fetches the charge once, applies the transition and persists what
/// changed.
#[derive(Clone)]
pub struct ReconcilePaymentUseCase<B, P, G>
where
	B: BookingRepository,
	P: PaymentRepository,
	G: ChargeGateway,
{
	booking_repo: B,
	payment_repo: P,
	gateway:      G,
}

impl<B, P, G> ReconcilePaymentUseCase<B, P, G>
where
	B: BookingRepository,
	P: PaymentRepository,
	G: ChargeGateway,
{
	pub fn new(booking_repo: B, payment_repo: P, gateway: G) -> Self {
		Self {
			booking_repo,
			payment_repo,
			gateway,
		}
	}

	pub async fn execute(
		&self,
		mut payment: Payment,
	) -> Result<PaymentWithCharge, ServiceError> {
		let Some(token) = payment.token.clone() else {
			return Ok(PaymentWithCharge {
				payment,
				charge: None,
			});
		};

		let charge = match self.gateway.detail_charge(&token).await {
			Ok(charge) => Some(charge),
			Err(e) => {
				warn!("Charge lookup failed for payment {}: {e}", payment.id);
				None
			}
		};

		let outcome =
			reconciliation::reconcile(payment.status, charge.as_ref(), Utc::now());

		if outcome.late_settlement {
			warn!(
				"Charge {token} settled after payment {} was cancelled locally",
				payment.id
			);
		}

		// Booking first: if this write fails the payment stays unpaid and
		// the next reconciliation retries the activation.
		if outcome.activate_booking {
			self.activate_booking(&payment).await?;
		}

		if outcome.changed(payment.status) {
			info!(
				"Payment {} moved from {} to {}",
				payment.id,
				payment.status.as_str(),
				outcome.status.as_str()
			);
			payment.status = outcome.status;
			if !self.payment_repo.save(payment.clone()).await? {
				warn!(
					"Booking {} was deleted while payment {} was reconciled",
					payment.booking_id, payment.id
				);
				return Err(ServiceError::not_found("Booking"));
			}
		}

		Ok(PaymentWithCharge { payment, charge })
	}

	async fn activate_booking(&self, payment: &Payment) -> Result<(), ServiceError> {
		let activated = match self.booking_repo.find(payment.booking_id).await? {
			Some(booking) if booking.active => return Ok(()),
			Some(mut booking) => {
				booking.active = true;
				self.booking_repo.update(booking).await?
			}
			None => false,
		};

		if activated {
			info!("Booking {} activated by payment {}", payment.booking_id, payment.id);
		} else {
			warn!(
				"Booking {} for paid payment {} no longer exists",
				payment.booking_id, payment.id
			);
		}
		Ok(())
	}
}
