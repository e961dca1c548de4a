use actix_web::{HttpResponse, Responder, delete, get, post, put, web};
use log::{info, warn};
use uuid::Uuid;

use crate::adapters::web::errors::ApiError;
use crate::adapters::web::requester::Requester;
use crate::adapters::web::schema::{BookingRequest, PageFilter, PageResponse};
use crate::adapters::web::services::{
	CreateBooking, DeleteBooking, QueryBookings, UpdateBooking,
};
use crate::domain::booking::Booking;
use crate::use_cases::dto::{CreateBookingCommand, UpdateBookingCommand};

#[post("/bookings")]
pub async fn create_booking(
	Requester(requester): Requester,
	payload: web::Json<BookingRequest>,
	create_booking_use_case: web::Data<CreateBooking>,
) -> Result<impl Responder, ApiError> {
	let payload = payload.into_inner();
	let command = CreateBookingCommand {
		venue_id:     payload.venue_id,
		party_size:   payload.party_size,
		reserved_for: payload.reserved_for,
	};

	let booking = create_booking_use_case
		.execute(&requester, command)
		.await
		.inspect_err(|e| warn!("Booking rejected for {}: {e}", requester.id))?;

	Ok(HttpResponse::Ok().json(booking))
}

#[get("/bookings")]
pub async fn list_bookings(
	Requester(requester): Requester,
	filter: web::Query<PageFilter>,
	query_bookings_use_case: web::Data<QueryBookings>,
) -> Result<impl Responder, ApiError> {
	let page = query_bookings_use_case
		.list(&requester, (&*filter).into())
		.await?;

	Ok(HttpResponse::Ok().json(PageResponse::<Booking>::from(page)))
}

#[get("/bookings/{id}")]
pub async fn get_booking(
	Requester(requester): Requester,
	path: web::Path<Uuid>,
	query_bookings_use_case: web::Data<QueryBookings>,
) -> Result<impl Responder, ApiError> {
	let booking = query_bookings_use_case
		.get(&requester, path.into_inner())
		.await?;

	Ok(HttpResponse::Ok().json(booking))
}

#[put("/bookings/{id}")]
pub async fn update_booking(
	Requester(requester): Requester,
	path: web::Path<Uuid>,
	payload: web::Json<BookingRequest>,
	update_booking_use_case: web::Data<UpdateBooking>,
) -> Result<impl Responder, ApiError> {
	let booking_id = path.into_inner();
	let payload = payload.into_inner();
	let command = UpdateBookingCommand {
		venue_id:     payload.venue_id,
		party_size:   payload.party_size,
		reserved_for: payload.reserved_for,
	};

	let booking = update_booking_use_case
		.execute(&requester, booking_id, command)
		.await
		.inspect_err(|e| warn!("Update of booking {booking_id} rejected: {e}"))?;

	Ok(HttpResponse::Ok().json(booking))
}

#[delete("/bookings/{id}")]
pub async fn delete_booking(
	Requester(requester): Requester,
	path: web::Path<Uuid>,
	delete_booking_use_case: web::Data<DeleteBooking>,
) -> Result<impl Responder, ApiError> {
	let booking_id = path.into_inner();
	delete_booking_use_case.execute(&requester, booking_id).await?;

	info!("Booking {booking_id} deleted by {}", requester.id);
	Ok(HttpResponse::Ok().json(serde_json::json!({
		"message": "Booking deleted successfully"
	})))
}
