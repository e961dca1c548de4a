use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use booking_payments::domain::booking::Booking;
use booking_payments::domain::payment::{Payment, PaymentStatus};
use booking_payments::domain::repository::{
	BookingRepository, Page, PageRequest, PaymentRepository, UserRepository,
	VenueRepository,
};
use booking_payments::domain::user::User;
use booking_payments::domain::venue::Venue;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
	users:    HashMap<Uuid, User>,
	venues:   HashMap<Uuid, Venue>,
	bookings: HashMap<Uuid, Booking>,
	payments: HashMap<Uuid, Payment>,
}

/// Shared in-memory store backing all four repositories, with write
/// failure injection and a count of booking writes.
#[derive(Clone, Default)]
pub struct InMemoryStore {
	tables:        Arc<Mutex<Tables>>,
	fail_writes:   Arc<AtomicBool>,
	booking_saves: Arc<AtomicUsize>,
}

impl InMemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn fail_writes(&self, fail: bool) {
		self.fail_writes.store(fail, Ordering::SeqCst);
	}

	pub fn booking_saves(&self) -> usize {
		self.booking_saves.load(Ordering::SeqCst)
	}

	pub fn booking(&self, id: Uuid) -> Option<Booking> {
		self.tables.lock().unwrap().bookings.get(&id).cloned()
	}

	pub fn payment(&self, id: Uuid) -> Option<Payment> {
		self.tables.lock().unwrap().payments.get(&id).cloned()
	}

	pub fn payment_count(&self) -> usize {
		self.tables.lock().unwrap().payments.len()
	}

	pub fn seed_user(&self, user: &User) {
		self.tables.lock().unwrap().users.insert(user.id, user.clone());
	}

	pub fn seed_venue(&self, venue: &Venue) {
		self.tables.lock().unwrap().venues.insert(venue.id, venue.clone());
	}

	pub fn seed_booking(&self, booking: &Booking) {
		self.tables
			.lock()
			.unwrap()
			.bookings
			.insert(booking.id, booking.clone());
	}

	pub fn seed_payment(&self, payment: &Payment) {
		self.tables
			.lock()
			.unwrap()
			.payments
			.insert(payment.id, payment.clone());
	}

	/// Same cascade as `BookingRepository::delete`, callable from sync hooks.
	pub fn purge_booking(&self, id: Uuid) -> bool {
		drop_booking(&mut self.tables.lock().unwrap(), id)
	}

	/// Drops the booking record without cascading to its payments.
	pub fn remove_booking_only(&self, id: Uuid) {
		self.tables.lock().unwrap().bookings.remove(&id);
	}

	fn check_writable(&self) -> Result<(), Box<dyn std::error::Error + Send>> {
		if self.fail_writes.load(Ordering::SeqCst) {
			return Err(Box::new(io::Error::other("store is read-only")));
		}
		Ok(())
	}
}

fn paginate<T, K: Ord>(mut items: Vec<T>, page: PageRequest, key: impl Fn(&T) -> K) -> Page<T> {
	items.sort_by_key(&key);
	let count = items.len();
	let data = items.into_iter().skip(page.skip).take(page.limit).collect();
	Page { data, count }
}

fn drop_booking(tables: &mut Tables, id: Uuid) -> bool {
	tables.payments.retain(|_, payment| payment.booking_id != id);
	tables.bookings.remove(&id).is_some()
}

#[async_trait]
impl BookingRepository for InMemoryStore {
	async fn save(
		&self,
		booking: Booking,
	) -> Result<(), Box<dyn std::error::Error + Send>> {
		self.check_writable()?;
		self.booking_saves.fetch_add(1, Ordering::SeqCst);
		self.tables.lock().unwrap().bookings.insert(booking.id, booking);
		Ok(())
	}

	async fn update(
		&self,
		booking: Booking,
	) -> Result<bool, Box<dyn std::error::Error + Send>> {
		self.check_writable()?;
		let mut tables = self.tables.lock().unwrap();
		let Some(stored) = tables.bookings.get_mut(&booking.id) else {
			return Ok(false);
		};
		self.booking_saves.fetch_add(1, Ordering::SeqCst);
		*stored = booking;
		Ok(true)
	}

	async fn find(
		&self,
		id: Uuid,
	) -> Result<Option<Booking>, Box<dyn std::error::Error + Send>> {
		Ok(self.booking(id))
	}

	async fn list(
		&self,
		owner_id: Option<Uuid>,
		page: PageRequest,
	) -> Result<Page<Booking>, Box<dyn std::error::Error + Send>> {
		let bookings: Vec<Booking> = self
			.tables
			.lock()
			.unwrap()
			.bookings
			.values()
			.filter(|b| owner_id.is_none_or(|owner| b.owner_id == owner))
			.cloned()
			.collect();
		Ok(paginate(bookings, page, |b: &Booking| (b.created_at, b.id)))
	}

	async fn delete(
		&self,
		id: Uuid,
	) -> Result<bool, Box<dyn std::error::Error + Send>> {
		self.check_writable()?;
		Ok(drop_booking(&mut self.tables.lock().unwrap(), id))
	}
}

#[async_trait]
impl PaymentRepository for InMemoryStore {
	async fn save(
		&self,
		payment: Payment,
	) -> Result<bool, Box<dyn std::error::Error + Send>> {
		self.check_writable()?;
		let mut tables = self.tables.lock().unwrap();
		if !tables.bookings.contains_key(&payment.booking_id) {
			return Ok(false);
		}
		tables.payments.insert(payment.id, payment);
		Ok(true)
	}

	async fn find(
		&self,
		id: Uuid,
	) -> Result<Option<Payment>, Box<dyn std::error::Error + Send>> {
		Ok(self.payment(id))
	}

	async fn list(
		&self,
		owner_id: Option<Uuid>,
		page: PageRequest,
	) -> Result<Page<Payment>, Box<dyn std::error::Error + Send>> {
		let payments: Vec<Payment> = self
			.tables
			.lock()
			.unwrap()
			.payments
			.values()
			.filter(|p| owner_id.is_none_or(|owner| p.owner_id == owner))
			.cloned()
			.collect();
		Ok(paginate(payments, page, |p: &Payment| (p.created_at, p.id)))
	}

	async fn find_by_status(
		&self,
		status: PaymentStatus,
	) -> Result<Vec<Payment>, Box<dyn std::error::Error + Send>> {
		Ok(self
			.tables
			.lock()
			.unwrap()
			.payments
			.values()
			.filter(|p| p.status == status)
			.cloned()
			.collect())
	}

	async fn delete(
		&self,
		id: Uuid,
	) -> Result<bool, Box<dyn std::error::Error + Send>> {
		self.check_writable()?;
		Ok(self.tables.lock().unwrap().payments.remove(&id).is_some())
	}
}

#[async_trait]
impl VenueRepository for InMemoryStore {
	async fn save(&self, venue: Venue)
	-> Result<(), Box<dyn std::error::Error + Send>> {
		self.check_writable()?;
		self.seed_venue(&venue);
		Ok(())
	}

	async fn find(
		&self,
		id: Uuid,
	) -> Result<Option<Venue>, Box<dyn std::error::Error + Send>> {
		Ok(self.tables.lock().unwrap().venues.get(&id).cloned())
	}

	async fn delete(
		&self,
		id: Uuid,
	) -> Result<bool, Box<dyn std::error::Error + Send>> {
		self.check_writable()?;
		let mut tables = self.tables.lock().unwrap();
		let bookings: Vec<Uuid> = tables
			.bookings
			.values()
			.filter(|b| b.venue_id == id)
			.map(|b| b.id)
			.collect();
		for booking_id in bookings {
			drop_booking(&mut tables, booking_id);
		}
		Ok(tables.venues.remove(&id).is_some())
	}
}

#[async_trait]
impl UserRepository for InMemoryStore {
	async fn save(&self, user: User) -> Result<(), Box<dyn std::error::Error + Send>> {
		self.check_writable()?;
		self.seed_user(&user);
		Ok(())
	}

	async fn find(
		&self,
		id: Uuid,
	) -> Result<Option<User>, Box<dyn std::error::Error + Send>> {
		Ok(self.tables.lock().unwrap().users.get(&id).cloned())
	}

	async fn delete(
		&self,
		id: Uuid,
	) -> Result<bool, Box<dyn std::error::Error + Send>> {
		self.check_writable()?;
		let mut tables = self.tables.lock().unwrap();
		let venues: Vec<Uuid> = tables
			.venues
			.values()
			.filter(|v| v.owner_id == id)
			.map(|v| v.id)
			.collect();
		let bookings: Vec<Uuid> = tables
			.bookings
			.values()
			.filter(|b| b.owner_id == id || venues.contains(&b.venue_id))
			.map(|b| b.id)
			.collect();
		for booking_id in bookings {
			drop_booking(&mut tables, booking_id);
		}
		tables.venues.retain(|_, v| v.owner_id != id);
		tables.payments.retain(|_, p| p.owner_id != id);
		Ok(tables.users.remove(&id).is_some())
	}
}
