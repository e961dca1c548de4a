//! Wire format of the Efí PIX API. Field names follow the provider's
//! vocabulary; everything is translated to domain types here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::charge::{Charge, ChargeRequest, ChargeStatus, Payer};
use crate::domain::gateway::GatewayError;

#[derive(Debug, Serialize)]
pub struct TokenRequest {
	pub grant_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
	pub access_token: String,
	#[serde(default = "default_token_lifetime")]
	pub expires_in:   u64,
}

fn default_token_lifetime() -> u64 {
	3600
}

#[derive(Debug, Serialize)]
pub struct CalendarRequest {
	#[serde(rename = "expiracao")]
	pub expiration: u32,
}

#[derive(Debug, Deserialize)]
pub struct CalendarResponse {
	#[serde(rename = "criacao")]
	pub created_at: String,
	#[serde(rename = "expiracao")]
	pub expiration: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Debtor {
	#[serde(skip_serializing_if = "Option::is_none", default)]
	pub cpf:  Option<String>,
	#[serde(rename = "nome")]
	pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Amount {
	pub original: String,
}

#[derive(Debug, Serialize)]
pub struct CobRequest {
	#[serde(rename = "calendario")]
	pub calendar:      CalendarRequest,
	#[serde(rename = "devedor")]
	pub debtor:        Debtor,
	#[serde(rename = "valor")]
	pub amount:        Amount,
	#[serde(rename = "chave")]
	pub key:           String,
	#[serde(rename = "solicitacaoPagador")]
	pub payer_message: String,
}

#[derive(Debug, Deserialize)]
pub struct CobResponse {
	#[serde(default)]
	pub txid:       Option<String>,
	pub status:     String,
	#[serde(rename = "calendario")]
	pub calendar:   CalendarResponse,
	#[serde(rename = "devedor", default)]
	pub debtor:     Option<Debtor>,
	#[serde(rename = "valor")]
	pub amount:     Amount,
	#[serde(rename = "pixCopiaECola", default)]
	pub copy_paste: Option<String>,
}

pub fn charge_status(code: &str) -> ChargeStatus {
	match code {
		"ATIVA" => ChargeStatus::Active,
		"CONCLUIDA" => ChargeStatus::Concluded,
		"REMOVIDA_PELO_USUARIO_RECEBEDOR" => ChargeStatus::RemovedByPayer,
		"REMOVIDA_PELO_PSP" => ChargeStatus::RemovedByProcessor,
		other => ChargeStatus::Other(other.to_string()),
	}
}

/// Minor units to a major-unit decimal string with two places.
pub fn format_amount(minor: i64) -> String {
	let sign = if minor < 0 { "-" } else { "" };
	let abs = minor.unsigned_abs();
	format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Parses a non-negative decimal with at most two places into minor units.
pub fn parse_amount(raw: &str) -> Option<i64> {
	let (units, cents) = match raw.trim().split_once('.') {
		Some((units, cents)) => (units, cents),
		None => (raw.trim(), ""),
	};
	if units.is_empty() ||
		!units.bytes().all(|b| b.is_ascii_digit()) ||
		cents.len() > 2 ||
		!cents.bytes().all(|b| b.is_ascii_digit())
	{
		return None;
	}

	let units: i64 = units.parse().ok()?;
	let cents: i64 = match cents.len() {
		0 => 0,
		1 => cents.parse::<i64>().ok()? * 10,
		_ => cents.parse().ok()?,
	};
	units.checked_mul(100)?.checked_add(cents)
}

impl From<ChargeRequest> for CobRequest {
	fn from(request: ChargeRequest) -> Self {
		CobRequest {
			calendar:      CalendarRequest {
				expiration: request.expiration_secs,
			},
			debtor:        Debtor {
				cpf:  Some(request.payer.fiscal_id),
				name: request.payer.name,
			},
			amount:        Amount {
				original: format_amount(request.amount),
			},
			key:           request.receiving_key,
			payer_message: request.description,
		}
	}
}

impl TryFrom<CobResponse> for Charge {
	type Error = GatewayError;

	fn try_from(response: CobResponse) -> Result<Self, Self::Error> {
		let malformed = |reason: String| GatewayError::MalformedResponse { reason };

		let txid = response
			.txid
			.filter(|txid| !txid.trim().is_empty())
			.ok_or_else(|| malformed("missing txid".to_string()))?;
		let created_at = DateTime::parse_from_rfc3339(&response.calendar.created_at)
			.map_err(|e| malformed(format!("invalid creation instant: {e}")))?
			.with_timezone(&Utc);
		let amount = parse_amount(&response.amount.original).ok_or_else(|| {
			malformed(format!("invalid amount '{}'", response.amount.original))
		})?;

		Ok(Charge {
			txid,
			status: charge_status(&response.status),
			created_at,
			expiration_secs: response.calendar.expiration,
			amount,
			payer: response.debtor.map(|debtor| Payer {
				fiscal_id: debtor.cpf.unwrap_or_default(),
				name:      debtor.name,
			}),
			copy_paste: response.copy_paste,
		})
	}
}
