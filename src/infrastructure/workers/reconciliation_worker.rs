use std::time::Duration;

use log::{debug, error, info};
use tokio::time::sleep;

use crate::domain::error::ServiceError;
use crate::domain::gateway::ChargeGateway;
use crate::domain::payment::PaymentStatus;
use crate::domain::repository::{BookingRepository, PaymentRepository};
use crate::use_cases::reconcile_payment::ReconcilePaymentUseCase;

/// Reconciles every pending payment once. Returns how many changed status.
pub async fn reconcile_pending_payments<B, P, G>(
	payment_repo: &P,
	reconciler: &ReconcilePaymentUseCase<B, P, G>,
) -> Result<usize, Box<dyn std::error::Error + Send>>
where
	B: BookingRepository,
	P: PaymentRepository,
	G: ChargeGateway,
{
	let pending = payment_repo.find_by_status(PaymentStatus::Pending).await?;
	debug!("Reconciling {} pending payments", pending.len());

	let mut changed = 0;
	for payment in pending {
		let payment_id = payment.id;
		match reconciler.execute(payment).await {
			Ok(result) if result.payment.status != PaymentStatus::Pending => {
				changed += 1;
			}
			Ok(_) => {}
			Err(ServiceError::NotFound { entity }) => {
				debug!("Skipping payment {payment_id}: {entity} is gone");
			}
			Err(e) => error!("Failed to reconcile payment {payment_id}: {e}"),
		}
	}

	Ok(changed)
}

pub async fn reconciliation_worker<B, P, G>(
	payment_repo: P,
	reconciler: ReconcilePaymentUseCase<B, P, G>,
	interval: Duration,
) where
	B: BookingRepository,
	P: PaymentRepository,
	G: ChargeGateway,
{
	loop {
		match reconcile_pending_payments(&payment_repo, &reconciler).await {
			Ok(0) => {}
			Ok(changed) => info!("Reconciliation pass updated {changed} payments"),
			Err(e) => error!("Failed to load pending payments: {e}"),
		}

		sleep(interval).await;
	}
}
