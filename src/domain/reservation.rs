//! Time-window rules a reservation request must satisfy before a booking is
//! recorded.

use std::fmt;

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use derive_more::derive::Error;

/// Reservation timestamp as submitted by the requester.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReservedFor {
	/// Wall-clock time at the venue, interpreted in the business timezone.
	Local(NaiveDateTime),
	/// An instant with an explicit offset.
	Absolute(DateTime<FixedOffset>),
}

#[derive(Debug, Clone, Copy)]
pub struct ReservationPolicy {
	pub min_lead_time: Duration,
	pub timezone:      Tz,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReservationRejection {
	NotInFuture,
	InsufficientNotice { minutes: i64 },
	NonexistentLocalTime { local: String, timezone: String },
}

impl fmt::Display for ReservationRejection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ReservationRejection::NotInFuture => {
				write!(f, "Reservation date must be in the future")
			}
			ReservationRejection::InsufficientNotice { minutes } => {
				write!(f, "Reservation must be booked with ")?;
				write_notice(f, *minutes)?;
				write!(f, " notice")
			}
			ReservationRejection::NonexistentLocalTime { local, timezone } => {
				write!(f, "Reservation time {local} does not exist in {timezone}")
			}
		}
	}
}

/// "2 hours", "1 hour 30 minutes", "45 minutes".
fn write_notice(f: &mut fmt::Formatter<'_>, minutes: i64) -> fmt::Result {
	let (hours, minutes) = (minutes / 60, minutes % 60);
	let plural = |n: i64| if n == 1 { "" } else { "s" };
	match (hours, minutes) {
		(0, m) => write!(f, "{m} minute{}", plural(m)),
		(h, 0) => write!(f, "{h} hour{}", plural(h)),
		(h, m) => write!(f, "{h} hour{} {m} minute{}", plural(h), plural(m)),
	}
}

/// Normalizes the requested time to a UTC instant. Ambiguous local times
/// resolve to the earliest candidate.
pub fn normalize(
	reserved_for: ReservedFor,
	timezone: Tz,
) -> Result<DateTime<Utc>, ReservationRejection> {
	match reserved_for {
		ReservedFor::Absolute(instant) => Ok(instant.with_timezone(&Utc)),
		ReservedFor::Local(local) => timezone
			.from_local_datetime(&local)
			.earliest()
			.map(|dt| dt.with_timezone(&Utc))
			.ok_or_else(|| ReservationRejection::NonexistentLocalTime {
				local:    local.to_string(),
				timezone: timezone.name().to_string(),
			}),
	}
}

/// Accepts iff `reserved_for` is strictly after `now` and at least
/// `min_lead_time` away from it.
pub fn validate(
	now: DateTime<Utc>,
	reserved_for: DateTime<Utc>,
	min_lead_time: Duration,
) -> Result<(), ReservationRejection> {
	if reserved_for <= now {
		return Err(ReservationRejection::NotInFuture);
	}
	if reserved_for - now < min_lead_time {
		return Err(ReservationRejection::InsufficientNotice {
			minutes: min_lead_time.num_minutes(),
		});
	}
	Ok(())
}

impl ReservationPolicy {
	pub fn accept(
		&self,
		now: DateTime<Utc>,
		reserved_for: ReservedFor,
	) -> Result<DateTime<Utc>, ReservationRejection> {
		let normalized = normalize(reserved_for, self.timezone)?;
		validate(now, normalized, self.min_lead_time)?;
		Ok(normalized)
	}
}
