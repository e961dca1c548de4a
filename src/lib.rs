use std::sync::Arc;
use std::time::Duration;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use log::{error, info};

use crate::adapters::web::{bookings_handler, payments_handler};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::gateway::efi_pix_gateway::EfiPixGateway;
use crate::infrastructure::persistence::redis_booking_repository::RedisBookingRepository;
use crate::infrastructure::persistence::redis_payment_repository::RedisPaymentRepository;
use crate::infrastructure::persistence::redis_user_repository::RedisUserRepository;
use crate::infrastructure::persistence::redis_venue_repository::RedisVenueRepository;
use crate::infrastructure::workers::reconciliation_worker::reconciliation_worker;
use crate::use_cases::create_booking::CreateBookingUseCase;
use crate::use_cases::create_payment::CreatePaymentUseCase;
use crate::use_cases::delete_booking::DeleteBookingUseCase;
use crate::use_cases::get_payment::GetPaymentUseCase;
use crate::use_cases::manage_payments::ManagePaymentsUseCase;
use crate::use_cases::query_bookings::QueryBookingsUseCase;
use crate::use_cases::reconcile_payment::ReconcilePaymentUseCase;
use crate::use_cases::update_booking::UpdateBookingUseCase;

pub mod domain {
	pub mod booking;
	pub mod charge;
	pub mod error;
	pub mod gateway;
	pub mod payment;
	pub mod reconciliation;
	pub mod repository;
	pub mod reservation;
	pub mod user;
	pub mod venue;
}

pub mod use_cases {
	pub mod create_booking;
	pub mod create_payment;
	pub mod delete_booking;
	pub mod dto;
	pub mod get_payment;
	pub mod manage_payments;
	pub mod query_bookings;
	pub mod reconcile_payment;
	pub mod update_booking;
}

pub mod adapters {
	pub mod web {
		pub mod bookings_handler;
		pub mod errors;
		pub mod payments_handler;
		pub mod requester;
		pub mod schema;
		pub mod services;
	}
}

pub mod infrastructure {
	pub mod config {
		pub mod redis;
		pub mod settings;
	}
	pub mod gateway {
		pub mod efi_pix_gateway;
		pub mod efi_schema;
	}
	pub mod persistence {
		pub mod redis_booking_repository;
		pub mod redis_payment_repository;
		pub mod redis_store;
		pub mod redis_user_repository;
		pub mod redis_venue_repository;
	}
	pub mod workers {
		pub mod reconciliation_worker;
	}
}

/// Registers every route on an actix service config.
pub fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(bookings_handler::create_booking)
		.service(bookings_handler::list_bookings)
		.service(bookings_handler::get_booking)
		.service(bookings_handler::update_booking)
		.service(bookings_handler::delete_booking)
		.service(payments_handler::create_payment)
		.service(payments_handler::list_payments)
		.service(payments_handler::get_payment)
		.service(payments_handler::override_payment_status)
		.service(payments_handler::delete_payment);
}

pub async fn run(config: Arc<Config>) -> std::io::Result<()> {
	let redis_client =
		redis::Client::open(config.redis_url.as_str()).map_err(|e| {
			error!("Invalid Redis URL: {e}");
			std::io::Error::other(e)
		})?;

	let reservation_policy =
		config.reservation_policy().map_err(std::io::Error::other)?;
	let gateway = EfiPixGateway::from_config(&config).map_err(|e| {
		error!("Failed to build the payment gateway client: {e}");
		std::io::Error::other(e)
	})?;

	let booking_repo = RedisBookingRepository::new(redis_client.clone());
	let payment_repo = RedisPaymentRepository::new(redis_client.clone());
	let venue_repo = RedisVenueRepository::new(redis_client.clone());
	let user_repo = RedisUserRepository::new(redis_client.clone());

	let reconciler = ReconcilePaymentUseCase::new(
		booking_repo.clone(),
		payment_repo.clone(),
		gateway.clone(),
	);
	let create_booking_use_case = CreateBookingUseCase::new(
		booking_repo.clone(),
		venue_repo.clone(),
		reservation_policy,
	);
	let update_booking_use_case = UpdateBookingUseCase::new(
		booking_repo.clone(),
		venue_repo.clone(),
		reservation_policy,
	);
	let query_bookings_use_case = QueryBookingsUseCase::new(booking_repo.clone());
	let delete_booking_use_case = DeleteBookingUseCase::new(booking_repo.clone());
	let create_payment_use_case = CreatePaymentUseCase::new(
		booking_repo.clone(),
		venue_repo.clone(),
		payment_repo.clone(),
		gateway.clone(),
		config.charge_policy(),
	);
	let get_payment_use_case = GetPaymentUseCase::new(
		booking_repo.clone(),
		payment_repo.clone(),
		reconciler.clone(),
	);
	let manage_payments_use_case = ManagePaymentsUseCase::new(payment_repo.clone());

	if let Some(interval) = config.reconcile_interval_secs {
		info!("Starting reconciliation worker every {interval}s...");
		tokio::spawn(reconciliation_worker(
			payment_repo.clone(),
			reconciler.clone(),
			Duration::from_secs(interval),
		));
	}

	info!("Starting Actix-Web server on 0.0.0.0:{}...", config.server_port);
	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.app_data(web::Data::new(user_repo.clone()))
			.app_data(web::Data::new(create_booking_use_case.clone()))
			.app_data(web::Data::new(update_booking_use_case.clone()))
			.app_data(web::Data::new(query_bookings_use_case.clone()))
			.app_data(web::Data::new(delete_booking_use_case.clone()))
			.app_data(web::Data::new(create_payment_use_case.clone()))
			.app_data(web::Data::new(get_payment_use_case.clone()))
			.app_data(web::Data::new(manage_payments_use_case.clone()))
			.configure(routes)
	})
	.keep_alive(Duration::from_secs(config.server_keepalive))
	.bind(("0.0.0.0", config.server_port))?
	.run()
	.await
}
