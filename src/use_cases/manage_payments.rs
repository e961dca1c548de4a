use log::info;
use uuid::Uuid;

use crate::domain::error::ServiceError;
use crate::domain::payment::Payment;
use crate::domain::repository::{Page, PageRequest, PaymentRepository};
use crate::domain::user::User;
use crate::use_cases::dto::OverridePaymentStatusCommand;

/// Listing, administrative status override and deletion of payments.
#[derive(Clone)]
pub struct ManagePaymentsUseCase<P: PaymentRepository> {
	payment_repo: P,
}

impl<P: PaymentRepository> ManagePaymentsUseCase<P> {
	pub fn new(payment_repo: P) -> Self {
		Self { payment_repo }
	}

	pub async fn list(
		&self,
		requester: &User,
		page: PageRequest,
	) -> Result<Page<Payment>, ServiceError> {
		let owner = (!requester.is_superuser).then_some(requester.id);
		Ok(self.payment_repo.list(owner, page).await?)
	}

	pub async fn override_status(
		&self,
		requester: &User,
		command: OverridePaymentStatusCommand,
	) -> Result<Payment, ServiceError> {
		if !requester.is_superuser {
			return Err(ServiceError::Permission);
		}

		let mut payment = self
			.payment_repo
			.find(command.payment_id)
			.await?
			.ok_or(ServiceError::not_found("Payment"))?;

		if payment.status != command.status {
			info!(
				"Payment {} status overridden from {} to {} by {}",
				payment.id,
				payment.status.as_str(),
				command.status.as_str(),
				requester.id
			);
			payment.status = command.status;
			if !self.payment_repo.save(payment.clone()).await? {
				return Err(ServiceError::not_found("Booking"));
			}
		}

		Ok(payment)
	}

	pub async fn delete(
		&self,
		requester: &User,
		payment_id: Uuid,
	) -> Result<(), ServiceError> {
		let payment = self
			.payment_repo
			.find(payment_id)
			.await?
			.ok_or(ServiceError::not_found("Payment"))?;

		if !requester.can_access(payment.owner_id) {
			return Err(ServiceError::Permission);
		}

		self.payment_repo.delete(payment_id).await?;
		Ok(())
	}
}
