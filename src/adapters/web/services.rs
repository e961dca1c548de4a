//! Concrete use-case types wired into the actix application.

use crate::infrastructure::gateway::efi_pix_gateway::EfiPixGateway;
use crate::infrastructure::persistence::redis_booking_repository::RedisBookingRepository;
use crate::infrastructure::persistence::redis_payment_repository::RedisPaymentRepository;
use crate::infrastructure::persistence::redis_venue_repository::RedisVenueRepository;
use crate::use_cases::create_booking::CreateBookingUseCase;
use crate::use_cases::create_payment::CreatePaymentUseCase;
use crate::use_cases::delete_booking::DeleteBookingUseCase;
use crate::use_cases::get_payment::GetPaymentUseCase;
use crate::use_cases::manage_payments::ManagePaymentsUseCase;
use crate::use_cases::query_bookings::QueryBookingsUseCase;
use crate::use_cases::update_booking::UpdateBookingUseCase;

pub type CreateBooking =
	CreateBookingUseCase<RedisBookingRepository, RedisVenueRepository>;
pub type UpdateBooking =
	UpdateBookingUseCase<RedisBookingRepository, RedisVenueRepository>;
pub type QueryBookings = QueryBookingsUseCase<RedisBookingRepository>;
pub type DeleteBooking = DeleteBookingUseCase<RedisBookingRepository>;
pub type CreatePayment = CreatePaymentUseCase<
	RedisBookingRepository,
	RedisVenueRepository,
	RedisPaymentRepository,
	EfiPixGateway,
>;
pub type GetPayment =
	GetPaymentUseCase<RedisBookingRepository, RedisPaymentRepository, EfiPixGateway>;
pub type ManagePayments = ManagePaymentsUseCase<RedisPaymentRepository>;
