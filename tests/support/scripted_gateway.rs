use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use booking_payments::domain::charge::{Charge, ChargeRequest, ChargeStatus};
use booking_payments::domain::gateway::{ChargeGateway, GatewayError};
use chrono::Utc;
use uuid::Uuid;

type Hook = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Script {
	charges:      HashMap<String, Charge>,
	create_error: Option<GatewayError>,
	lookup_error: Option<GatewayError>,
	requests:     Vec<ChargeRequest>,
	detail_calls: usize,
	before_call:  Option<Hook>,
}

/// Gateway double answering from a scripted set of charges.
#[derive(Clone, Default)]
pub struct ScriptedGateway {
	script: Arc<Mutex<Script>>,
}

impl ScriptedGateway {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn put_charge(&self, charge: Charge) {
		self.script
			.lock()
			.unwrap()
			.charges
			.insert(charge.txid.clone(), charge);
	}

	pub fn set_status(&self, txid: &str, status: ChargeStatus) {
		if let Some(charge) = self.script.lock().unwrap().charges.get_mut(txid) {
			charge.status = status;
		}
	}

	pub fn fail_creates_with(&self, error: GatewayError) {
		self.script.lock().unwrap().create_error = Some(error);
	}

	pub fn fail_lookups_with(&self, error: GatewayError) {
		self.script.lock().unwrap().lookup_error = Some(error);
	}

	/// Runs `hook` at the start of every gateway call, before it answers.
	pub fn before_call(&self, hook: impl Fn() + Send + Sync + 'static) {
		self.script.lock().unwrap().before_call = Some(Arc::new(hook));
	}

	fn run_hook(&self) {
		let hook = self.script.lock().unwrap().before_call.clone();
		if let Some(hook) = hook {
			hook();
		}
	}

	pub fn requests(&self) -> Vec<ChargeRequest> {
		self.script.lock().unwrap().requests.clone()
	}

	pub fn detail_calls(&self) -> usize {
		self.script.lock().unwrap().detail_calls
	}
}

#[async_trait]
impl ChargeGateway for ScriptedGateway {
	async fn create_charge(
		&self,
		request: ChargeRequest,
	) -> Result<Charge, GatewayError> {
		self.run_hook();
		let mut script = self.script.lock().unwrap();
		script.requests.push(request.clone());
		if let Some(error) = script.create_error.clone() {
			return Err(error);
		}

		let charge = Charge {
			txid:            Uuid::new_v4().simple().to_string(),
			status:          ChargeStatus::Active,
			created_at:      Utc::now(),
			expiration_secs: u64::from(request.expiration_secs),
			amount:          request.amount,
			payer:           Some(request.payer),
			copy_paste:      Some("00020101021226830014br.gov.bcb.pix".to_string()),
		};
		script.charges.insert(charge.txid.clone(), charge.clone());
		Ok(charge)
	}

	async fn detail_charge(&self, txid: &str) -> Result<Charge, GatewayError> {
		self.run_hook();
		let mut script = self.script.lock().unwrap();
		script.detail_calls += 1;
		if let Some(error) = script.lookup_error.clone() {
			return Err(error);
		}

		script
			.charges
			.get(txid)
			.cloned()
			.ok_or_else(|| GatewayError::NotFound {
				txid: txid.to_string(),
			})
	}
}
