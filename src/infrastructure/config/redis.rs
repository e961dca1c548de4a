pub const BOOKINGS_KEY: &str = "bookings";
pub const PAYMENTS_KEY: &str = "payments";

pub fn booking_key(id: impl std::fmt::Display) -> String {
	format!("booking:{id}")
}

pub fn payment_key(id: impl std::fmt::Display) -> String {
	format!("payment:{id}")
}

pub fn venue_key(id: impl std::fmt::Display) -> String {
	format!("venue:{id}")
}

pub fn user_key(id: impl std::fmt::Display) -> String {
	format!("user:{id}")
}

pub fn booking_payments_key(booking_id: impl std::fmt::Display) -> String {
	format!("booking:{booking_id}:payments")
}

pub fn venue_bookings_key(venue_id: impl std::fmt::Display) -> String {
	format!("venue:{venue_id}:bookings")
}

pub fn user_bookings_key(user_id: impl std::fmt::Display) -> String {
	format!("user:{user_id}:bookings")
}

pub fn user_payments_key(user_id: impl std::fmt::Display) -> String {
	format!("user:{user_id}:payments")
}

pub fn user_venues_key(user_id: impl std::fmt::Display) -> String {
	format!("user:{user_id}:venues")
}

pub fn payments_by_status_key(status: &str) -> String {
	format!("payments:status:{status}")
}
