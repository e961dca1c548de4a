use async_trait::async_trait;
use derive_more::derive::{Display, Error};

use crate::domain::charge::{Charge, ChargeRequest};

#[derive(Debug, Display, Error, Clone, PartialEq)]
pub enum GatewayError {
	#[display("charge {txid} not found")]
	NotFound { txid: String },
	#[display("gateway request failed: {reason}")]
	Transport { reason: String },
	#[display("gateway rejected the request with status {status}: {reason}")]
	Rejected { status: u16, reason: String },
	#[display("gateway returned a malformed charge: {reason}")]
	MalformedResponse { reason: String },
	#[display("gateway temporarily unavailable")]
	Unavailable,
	#[display("gateway client misconfigured: {reason}")]
	Configuration { reason: String },
}

/// Issues and looks up instant-payment charges at the payment provider.
#[async_trait]
pub trait ChargeGateway: Send + Sync + 'static {
	async fn create_charge(
		&self,
		request: ChargeRequest,
	) -> Result<Charge, GatewayError>;

	async fn detail_charge(&self, txid: &str) -> Result<Charge, GatewayError>;
}
