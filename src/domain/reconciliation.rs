//! Pure transition from (stored status, charge snapshot, now) to the next
//! payment status. Shared by the read path and the background worker.

use chrono::{DateTime, Utc};

use crate::domain::charge::{Charge, ChargeStatus};
use crate::domain::payment::PaymentStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciliation {
	pub status:           PaymentStatus,
	/// Set only on the transition into `Paid`.
	pub activate_booking: bool,
	/// The gateway reports a settled charge for a payment already cancelled
	/// locally. Left unresolved; callers surface it.
	pub late_settlement:  bool,
}

impl Reconciliation {
	pub fn changed(&self, current: PaymentStatus) -> bool {
		self.status != current
	}
}

pub fn reconcile(
	current: PaymentStatus,
	charge: Option<&Charge>,
	now: DateTime<Utc>,
) -> Reconciliation {
	if current.is_terminal() {
		let settled =
			charge.is_some_and(|charge| charge.status == ChargeStatus::Concluded);
		return Reconciliation {
			status:           current,
			activate_booking: false,
			late_settlement:  current == PaymentStatus::Cancelled && settled,
		};
	}

	let status = derive_status(charge, now);
	Reconciliation {
		status,
		activate_booking: status == PaymentStatus::Paid,
		late_settlement: false,
	}
}

fn derive_status(charge: Option<&Charge>, now: DateTime<Utc>) -> PaymentStatus {
	let Some(charge) = charge else {
		return PaymentStatus::Failed;
	};

	match charge.status {
		ChargeStatus::Concluded => PaymentStatus::Paid,
		ChargeStatus::RemovedByPayer | ChargeStatus::RemovedByProcessor => {
			PaymentStatus::Cancelled
		}
		ChargeStatus::Active if charge.is_expired(now) => PaymentStatus::Cancelled,
		ChargeStatus::Active | ChargeStatus::Other(_) => PaymentStatus::Pending,
	}
}
