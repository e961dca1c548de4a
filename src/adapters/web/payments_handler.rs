use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use log::{info, warn};
use uuid::Uuid;

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::requester::Requester;
use crate::adapters::web::schema::{
	PageFilter, PageResponse, PaymentRequest, PaymentStatusRequest,
};
use crate::adapters::web::services::{CreatePayment, GetPayment, ManagePayments};
use crate::domain::payment::Payment;
use crate::use_cases::dto::{CreatePaymentCommand, OverridePaymentStatusCommand};

#[post("/payments")]
pub async fn create_payment(
	Requester(requester): Requester,
	payload: web::Json<PaymentRequest>,
	create_payment_use_case: web::Data<CreatePayment>,
) -> Result<impl Responder, ApiError> {
	let command = CreatePaymentCommand {
		booking_id: payload.booking_id,
	};

	let created = create_payment_use_case
		.execute(&requester, command)
		.await
		.inspect_err(|e| {
			warn!("Payment for booking {} not created: {e}", payload.booking_id)
		})?;

	Ok(HttpResponse::Ok().json(created))
}

#[get("/payments")]
pub async fn list_payments(
	Requester(requester): Requester,
	filter: web::Query<PageFilter>,
	manage_payments_use_case: web::Data<ManagePayments>,
) -> Result<impl Responder, ApiError> {
	let page = manage_payments_use_case
		.list(&requester, (&*filter).into())
		.await?;

	Ok(HttpResponse::Ok().json(PageResponse::<Payment>::from(page)))
}

#[get("/payments/{id}")]
pub async fn get_payment(
	Requester(requester): Requester,
	path: web::Path<Uuid>,
	get_payment_use_case: web::Data<GetPayment>,
) -> Result<impl Responder, ApiError> {
	let detail = get_payment_use_case
		.execute(&requester, path.into_inner())
		.await?;

	Ok(HttpResponse::Ok().json(detail))
}

#[put("/payments/{id}")]
pub async fn override_payment_status(
	Requester(requester): Requester,
	path: web::Path<Uuid>,
	payload: web::Json<PaymentStatusRequest>,
	manage_payments_use_case: web::Data<ManagePayments>,
) -> Result<impl Responder, ApiError> {
	let command = OverridePaymentStatusCommand {
		payment_id: path.into_inner(),
		status:     payload.status,
	};

	let payment = manage_payments_use_case
		.override_status(&requester, command)
		.await?;

	Ok(HttpResponse::Ok().json(payment))
}

#[delete("/payments/{id}")]
pub async fn delete_payment(
	Requester(requester): Requester,
	path: web::Path<Uuid>,
	manage_payments_use_case: web::Data<ManagePayments>,
) -> Result<impl Responder, ApiError> {
	let payment_id = path.into_inner();
	manage_payments_use_case.delete(&requester, payment_id).await?;

	info!("Payment {payment_id} deleted by {}", requester.id);
	Ok(HttpResponse::Ok().json(serde_json::json!({
		"message": "Payment deleted successfully"
	})))
}
