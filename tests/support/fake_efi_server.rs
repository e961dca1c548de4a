use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

pub const ACCESS_TOKEN: &str = "fake-access-token";

/// Shared state of the fake provider, inspected and steered by tests.
#[derive(Default)]
pub struct FakeEfiState {
	charges:        Mutex<HashMap<String, Value>>,
	created:        Mutex<Vec<Value>>,
	token_requests: AtomicUsize,
	cob_requests:   AtomicUsize,
	lookup_delay:   Mutex<Option<Duration>>,
	fail_status:    Mutex<Option<u16>>,
	malformed:      Mutex<bool>,
}

impl FakeEfiState {
	pub fn token_requests(&self) -> usize {
		self.token_requests.load(Ordering::SeqCst)
	}

	/// Requests that reached `/v2/cob`, creations and lookups alike.
	pub fn cob_requests(&self) -> usize {
		self.cob_requests.load(Ordering::SeqCst)
	}

	pub fn created(&self) -> Vec<Value> {
		self.created.lock().unwrap().clone()
	}

	pub fn set_status(&self, txid: &str, status: &str) {
		if let Some(cob) = self.charges.lock().unwrap().get_mut(txid) {
			cob["status"] = json!(status);
		}
	}

	pub fn set_created_at(&self, txid: &str, created_at: DateTime<Utc>) {
		if let Some(cob) = self.charges.lock().unwrap().get_mut(txid) {
			cob["calendario"]["criacao"] = json!(created_at.to_rfc3339());
		}
	}

	pub fn insert_charge(&self, txid: &str, cob: Value) {
		self.charges.lock().unwrap().insert(txid.to_string(), cob);
	}

	pub fn delay_lookups(&self, delay: Duration) {
		*self.lookup_delay.lock().unwrap() = Some(delay);
	}

	/// Answers every charge request with `status`.
	pub fn fail_with(&self, status: u16) {
		*self.fail_status.lock().unwrap() = Some(status);
	}

	pub fn recover(&self) {
		*self.fail_status.lock().unwrap() = None;
		*self.malformed.lock().unwrap() = false;
	}

	/// Answers lookups with a body missing the required charge fields.
	pub fn return_malformed_lookups(&self) {
		*self.malformed.lock().unwrap() = true;
	}

	fn simulated_failure(&self) -> Option<HttpResponse> {
		let status = (*self.fail_status.lock().unwrap())?;
		let status = actix_web::http::StatusCode::from_u16(status).ok()?;
		Some(
			HttpResponse::build(status)
				.json(json!({ "nome": "erro", "mensagem": "simulated failure" })),
		)
	}
}

pub struct FakeEfiServer {
	pub url:   String,
	pub state: web::Data<FakeEfiState>,
	handle:    ServerHandle,
}

impl FakeEfiServer {
	pub async fn stop(self) {
		self.handle.stop(false).await;
	}
}

fn authorized(req: &HttpRequest, scheme: &str) -> bool {
	req.headers()
		.get("Authorization")
		.and_then(|value| value.to_str().ok())
		.is_some_and(|value| value.starts_with(scheme))
}

async fn token(req: HttpRequest, state: web::Data<FakeEfiState>) -> HttpResponse {
	if !authorized(&req, "Basic ") {
		return HttpResponse::Unauthorized().finish();
	}
	state.token_requests.fetch_add(1, Ordering::SeqCst);
	HttpResponse::Ok().json(json!({
		"access_token": ACCESS_TOKEN,
		"token_type": "Bearer",
		"expires_in": 3600,
		"scope": "cob.read cob.write"
	}))
}

async fn create_cob(
	req: HttpRequest,
	state: web::Data<FakeEfiState>,
	body: web::Json<Value>,
) -> HttpResponse {
	if !authorized(&req, &format!("Bearer {ACCESS_TOKEN}")) {
		return HttpResponse::Unauthorized().finish();
	}
	state.cob_requests.fetch_add(1, Ordering::SeqCst);
	if let Some(failure) = state.simulated_failure() {
		return failure;
	}

	let body = body.into_inner();
	let txid = Uuid::new_v4().simple().to_string();
	let cob = json!({
		"txid": txid,
		"status": "ATIVA",
		"calendario": {
			"criacao": Utc::now().to_rfc3339(),
			"expiracao": body["calendario"]["expiracao"],
		},
		"devedor": body["devedor"],
		"valor": body["valor"],
		"chave": body["chave"],
		"solicitacaoPagador": body["solicitacaoPagador"],
		"pixCopiaECola": format!("00020101021226830014br.gov.bcb.pix{txid}"),
	});

	state.created.lock().unwrap().push(body);
	state.insert_charge(&txid, cob.clone());
	HttpResponse::Created().json(cob)
}

async fn detail_cob(
	req: HttpRequest,
	state: web::Data<FakeEfiState>,
	txid: web::Path<String>,
) -> HttpResponse {
	if !authorized(&req, &format!("Bearer {ACCESS_TOKEN}")) {
		return HttpResponse::Unauthorized().finish();
	}
	state.cob_requests.fetch_add(1, Ordering::SeqCst);
	let delay = *state.lookup_delay.lock().unwrap();
	if let Some(delay) = delay {
		actix_web::rt::time::sleep(delay).await;
	}
	if let Some(failure) = state.simulated_failure() {
		return failure;
	}
	if *state.malformed.lock().unwrap() {
		return HttpResponse::Ok().json(json!({ "status": "ATIVA" }));
	}

	let cob = state.charges.lock().unwrap().get(txid.as_str()).cloned();
	match cob {
		Some(cob) => HttpResponse::Ok().json(cob),
		None => HttpResponse::NotFound().json(json!({
			"nome": "cobranca_nao_encontrada",
			"mensagem": "Nenhuma cobrança encontrada para o txid informado"
		})),
	}
}

/// Starts the fake provider on an ephemeral local port.
pub async fn start_fake_efi_server() -> FakeEfiServer {
	let state = web::Data::new(FakeEfiState::default());
	let app_state = state.clone();

	let server = HttpServer::new(move || {
		App::new()
			.app_data(app_state.clone())
			.route("/oauth/token", web::post().to(token))
			.route("/v2/cob", web::post().to(create_cob))
			.route("/v2/cob/{txid}", web::get().to(detail_cob))
	})
	.workers(1)
	.bind(("127.0.0.1", 0))
	.expect("Failed to bind fake Efí server");

	let port = server.addrs()[0].port();
	let server = server.run();
	let handle = server.handle();
	actix_web::rt::spawn(server);

	FakeEfiServer {
		url: format!("http://127.0.0.1:{port}"),
		state,
		handle,
	}
}
