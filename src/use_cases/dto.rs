use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::charge::Charge;
use crate::domain::payment::{Payment, PaymentStatus};
use crate::domain::reservation::ReservedFor;

#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
	pub venue_id:     Uuid,
	pub party_size:   u8,
	pub reserved_for: ReservedFor,
}

/// Full replacement of the editable booking fields.
#[derive(Debug, Clone)]
pub struct UpdateBookingCommand {
	pub venue_id:     Uuid,
	pub party_size:   u8,
	pub reserved_for: ReservedFor,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CreatePaymentCommand {
	pub booking_id: Uuid,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OverridePaymentStatusCommand {
	pub payment_id: Uuid,
	pub status:     PaymentStatus,
}

/// A payment with the charge snapshot it was last reconciled against.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PaymentWithCharge {
	pub payment: Payment,
	pub charge:  Option<Charge>,
}
