use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use circuitbreaker_rs::{BreakerError, CircuitBreaker, DefaultPolicy};
use log::{debug, error, warn};
use reqwest::{Client, Identity, Response, StatusCode};
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::domain::charge::{Charge, ChargeRequest};
use crate::domain::gateway::{ChargeGateway, GatewayError};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::gateway::efi_schema::{
	CobRequest, CobResponse, TokenRequest, TokenResponse,
};

/// Tokens are refreshed this long before the provider says they expire.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Consecutive transport or 5xx failures that open the breaker.
pub const BREAKER_CONSECUTIVE_FAILURES: u64 = 5;
pub const BREAKER_FAILURE_RATE: f64 = 0.5;
/// Calls observed before the failure rate is considered.
pub const BREAKER_MIN_THROUGHPUT: u64 = 10;
pub const BREAKER_COOLDOWN: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct GatewayCredentials {
	pub client_id:     String,
	pub client_secret: String,
}

struct AccessToken {
	value:      String,
	expires_at: Instant,
}

/// Gateway responses are classified twice: the outer error counts against
/// the circuit breaker (transport failures, 5xx), the inner one does not
/// (lookups of unknown charges, client errors, malformed bodies).
type Guarded<T> = Result<Result<T, GatewayError>, GatewayError>;

#[derive(Clone)]
pub struct EfiPixGateway {
	http_client: Client,
	base_url:    String,
	credentials: GatewayCredentials,
	token:       Arc<Mutex<Option<AccessToken>>>,
	breaker:     CircuitBreaker<DefaultPolicy, GatewayError>,
}

impl EfiPixGateway {
	pub fn new(
		base_url: impl Into<String>,
		credentials: GatewayCredentials,
		http_client: Client,
	) -> Self {
		Self {
			http_client,
			base_url: base_url.into().trim_end_matches('/').to_string(),
			credentials,
			token: Arc::new(Mutex::new(None)),
			breaker: CircuitBreaker::<DefaultPolicy, GatewayError>::builder()
				.failure_threshold(BREAKER_FAILURE_RATE)
				.min_throughput(BREAKER_MIN_THROUGHPUT)
				.consecutive_failures(BREAKER_CONSECUTIVE_FAILURES)
				.cooldown(BREAKER_COOLDOWN)
				.build(),
		}
	}

	/// Builds the client with the configured timeout and, when a
	/// certificate is configured, mutual TLS.
	pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
		let misconfigured =
			|reason: String| GatewayError::Configuration { reason };

		let mut builder = Client::builder()
			.timeout(Duration::from_millis(config.gateway_timeout_ms));

		if let Some(path) = &config.gateway_certificate_path {
			let pem = std::fs::read(path).map_err(|e| {
				misconfigured(format!("cannot read certificate {path}: {e}"))
			})?;
			let identity = Identity::from_pem(&pem)
				.map_err(|e| misconfigured(format!("invalid certificate {path}: {e}")))?;
			builder = builder.identity(identity);
		}

		let http_client = builder
			.build()
			.map_err(|e| misconfigured(format!("cannot build http client: {e}")))?;

		Ok(Self::new(
			config.gateway_base_url.clone(),
			GatewayCredentials {
				client_id:     config.gateway_client_id.clone(),
				client_secret: config.gateway_client_secret.clone(),
			},
			http_client,
		))
	}

	async fn access_token(&self) -> Result<String, GatewayError> {
		let mut cached = self.token.lock().await;
		if let Some(token) = cached.as_ref() &&
			token.expires_at > Instant::now()
		{
			return Ok(token.value.clone());
		}

		let resp = self
			.http_client
			.post(format!("{}/oauth/token", self.base_url))
			.basic_auth(
				&self.credentials.client_id,
				Some(&self.credentials.client_secret),
			)
			.json(&TokenRequest {
				grant_type: "client_credentials",
			})
			.send()
			.await
			.map_err(transport)?;

		if !resp.status().is_success() {
			return Err(GatewayError::Rejected {
				status: resp.status().as_u16(),
				reason: "authentication failed".to_string(),
			});
		}

		let token: TokenResponse =
			resp.json().await.map_err(|e| GatewayError::MalformedResponse {
				reason: format!("invalid token response: {e}"),
			})?;
		debug!("Obtained gateway access token valid for {}s", token.expires_in);

		let lifetime = Duration::from_secs(token.expires_in)
			.saturating_sub(TOKEN_REFRESH_MARGIN);
		*cached = Some(AccessToken {
			value:      token.access_token.clone(),
			expires_at: Instant::now() + lifetime,
		});
		Ok(token.access_token)
	}

	async fn forget_token(&self) {
		*self.token.lock().await = None;
	}

	async fn post_charge(&self, body: &CobRequest) -> Guarded<Charge> {
		let token = self.access_token().await?;
		let resp = self
			.http_client
			.post(format!("{}/v2/cob", self.base_url))
			.bearer_auth(token)
			.json(body)
			.send()
			.await
			.map_err(transport)?;

		self.read_charge(resp).await
	}

	async fn get_charge(&self, txid: &str) -> Guarded<Charge> {
		let token = self.access_token().await?;
		let resp = self
			.http_client
			.get(format!("{}/v2/cob/{txid}", self.base_url))
			.bearer_auth(token)
			.send()
			.await
			.map_err(transport)?;

		if resp.status() == StatusCode::NOT_FOUND {
			return Ok(Err(GatewayError::NotFound {
				txid: txid.to_string(),
			}));
		}

		self.read_charge(resp).await
	}

	async fn read_charge(&self, resp: Response) -> Guarded<Charge> {
		let status = resp.status();

		if status == StatusCode::UNAUTHORIZED {
			self.forget_token().await;
		}

		if !status.is_success() {
			let reason = resp.text().await.unwrap_or_default();
			let rejected = GatewayError::Rejected {
				status: status.as_u16(),
				reason,
			};
			if status.is_server_error() {
				return Err(rejected);
			}
			return Ok(Err(rejected));
		}

		match resp.json::<CobResponse>().await {
			Ok(body) => Ok(Charge::try_from(body)),
			Err(e) => Ok(Err(GatewayError::MalformedResponse {
				reason: e.to_string(),
			})),
		}
	}
}

fn transport(e: reqwest::Error) -> GatewayError {
	let reason = if e.is_timeout() {
		format!("timed out: {e}")
	} else {
		e.to_string()
	};
	GatewayError::Transport { reason }
}

fn unguard<T>(
	result: Result<Result<T, GatewayError>, BreakerError<GatewayError>>,
) -> Result<T, GatewayError> {
	match result {
		Ok(outcome) => outcome,
		Err(BreakerError::Open) => {
			warn!("Gateway circuit breaker is open");
			Err(GatewayError::Unavailable)
		}
		Err(BreakerError::Operation(e)) => {
			error!("Gateway call failed: {e}");
			Err(e)
		}
		Err(e) => {
			error!("Gateway call failed: {e}");
			Err(GatewayError::Transport {
				reason: e.to_string(),
			})
		}
	}
}

#[async_trait]
impl ChargeGateway for EfiPixGateway {
	async fn create_charge(
		&self,
		request: ChargeRequest,
	) -> Result<Charge, GatewayError> {
		let body = CobRequest::from(request);
		let result = self
			.breaker
			.call_async(|| async { self.post_charge(&body).await })
			.await;

		unguard(result)
	}

	async fn detail_charge(&self, txid: &str) -> Result<Charge, GatewayError> {
		let result = self
			.breaker
			.call_async(|| async { self.get_charge(txid).await })
			.await;

		unguard(result)
	}
}
