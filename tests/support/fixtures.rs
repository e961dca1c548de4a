use booking_payments::domain::booking::Booking;
use booking_payments::domain::charge::{Charge, ChargeStatus};
use booking_payments::domain::payment::{Payment, PaymentMethod, PaymentStatus};
use booking_payments::domain::user::User;
use booking_payments::domain::venue::Venue;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

pub fn customer() -> User {
	User {
		id:           Uuid::new_v4(),
		full_name:    Some("Maria Souza".to_string()),
		fiscal_id:    Some("12345678909".to_string()),
		is_superuser: false,
	}
}

pub fn superuser() -> User {
	User {
		is_superuser: true,
		..customer()
	}
}

pub fn venue(owner_id: Uuid, reservation_price: i64) -> Venue {
	Venue {
		id: Uuid::new_v4(),
		owner_id,
		name: "Cantina da Praça".to_string(),
		reservation_price,
	}
}

pub fn booking(venue: &Venue, owner: &User) -> Booking {
	Booking {
		id:           Uuid::new_v4(),
		venue_id:     venue.id,
		owner_id:     owner.id,
		party_size:   4,
		reserved_for: Utc::now() + Duration::days(2),
		active:       false,
		created_at:   Utc::now(),
	}
}

pub fn payment(booking: &Booking, token: Option<&str>) -> Payment {
	Payment {
		id:         Uuid::new_v4(),
		booking_id: booking.id,
		owner_id:   booking.owner_id,
		method:     PaymentMethod::Pix,
		value:      4550,
		status:     PaymentStatus::Pending,
		token:      token.map(str::to_string),
		created_at: Utc::now(),
	}
}

pub fn charge(txid: &str, status: ChargeStatus, created_at: DateTime<Utc>) -> Charge {
	Charge {
		txid: txid.to_string(),
		status,
		created_at,
		expiration_secs: 30,
		amount: 4550,
		payer: None,
		copy_paste: None,
	}
}
