use uuid::Uuid;

use crate::domain::error::ServiceError;
use crate::domain::gateway::ChargeGateway;
use crate::domain::repository::{BookingRepository, PaymentRepository};
use crate::domain::user::User;
use crate::use_cases::dto::PaymentWithCharge;
use crate::use_cases::reconcile_payment::ReconcilePaymentUseCase;

/// Payment detail read. Always reconciles before answering.
#[derive(Clone)]
pub struct GetPaymentUseCase<B, P, G>
where
	B: BookingRepository,
	P: PaymentRepository,
	G: ChargeGateway,
{
	booking_repo: B,
	payment_repo: P,
	reconciler:   ReconcilePaymentUseCase<B, P, G>,
}

impl<B, P, G> GetPaymentUseCase<B, P, G>
where
	B: BookingRepository,
	P: PaymentRepository,
	G: ChargeGateway,
{
	pub fn new(
		booking_repo: B,
		payment_repo: P,
		reconciler: ReconcilePaymentUseCase<B, P, G>,
	) -> Self {
		Self {
			booking_repo,
			payment_repo,
			reconciler,
		}
	}

	pub async fn execute(
		&self,
		requester: &User,
		payment_id: Uuid,
	) -> Result<PaymentWithCharge, ServiceError> {
		let payment = self
			.payment_repo
			.find(payment_id)
			.await?
			.ok_or(ServiceError::not_found("Payment"))?;

		if self.booking_repo.find(payment.booking_id).await?.is_none() {
			return Err(ServiceError::not_found("Booking"));
		}

		if !requester.can_access(payment.owner_id) {
			return Err(ServiceError::Permission);
		}

		self.reconciler.execute(payment).await
	}
}
