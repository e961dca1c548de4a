use chrono::Duration;
use chrono_tz::Tz;
use serde::Deserialize;

use crate::domain::reservation::ReservationPolicy;
use crate::use_cases::create_payment::ChargePolicy;

/// One year.
pub const MAX_RESERVATION_LEAD_TIME_MINUTES: i64 = 525_600;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
	pub redis_url: String,
	pub server_port: u16,
	pub server_keepalive: u64,
	pub gateway_base_url: String,
	pub gateway_client_id: String,
	pub gateway_client_secret: String,
	pub gateway_certificate_path: Option<String>,
	pub gateway_pix_key: String,
	pub gateway_timeout_ms: u64,
	pub charge_expiration_secs: u32,
	pub reservation_lead_time_minutes: i64,
	pub business_timezone: String,
	pub reconcile_interval_secs: Option<u64>,
}

impl Config {
	pub fn load() -> Result<Self, config::ConfigError> {
		let config_builder = config::Config::builder()
			.set_default("server_port", 9999)?
			.set_default("server_keepalive", 75)?
			.set_default("gateway_timeout_ms", 5000)?
			.set_default("charge_expiration_secs", 30)?
			.set_default("reservation_lead_time_minutes", 120)?
			.set_default("business_timezone", "America/Sao_Paulo")?
			.add_source(config::Environment::with_prefix("APP"))
			.build()?;

		let config: Config = config_builder.try_deserialize()?;
		config.timezone()?;
		config.lead_time()?;
		Ok(config)
	}

	pub fn lead_time(&self) -> Result<Duration, config::ConfigError> {
		let minutes = self.reservation_lead_time_minutes;
		if !(0..=MAX_RESERVATION_LEAD_TIME_MINUTES).contains(&minutes) {
			return Err(config::ConfigError::Message(format!(
				"reservation_lead_time_minutes must be between 0 and \
				 {MAX_RESERVATION_LEAD_TIME_MINUTES}, got {minutes}"
			)));
		}
		Ok(Duration::minutes(minutes))
	}

	pub fn timezone(&self) -> Result<Tz, config::ConfigError> {
		self.business_timezone.parse::<Tz>().map_err(|e| {
			config::ConfigError::Message(format!(
				"invalid business_timezone '{}': {e}",
				self.business_timezone
			))
		})
	}

	pub fn reservation_policy(&self) -> Result<ReservationPolicy, config::ConfigError> {
		Ok(ReservationPolicy {
			min_lead_time: self.lead_time()?,
			timezone:      self.timezone()?,
		})
	}

	pub fn charge_policy(&self) -> ChargePolicy {
		ChargePolicy {
			expiration_secs: self.charge_expiration_secs,
			receiving_key:   self.gateway_pix_key.clone(),
		}
	}
}
