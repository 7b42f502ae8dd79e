//! Port contracts for room booking.
//!
//! Ports define infrastructure-agnostic interfaces used by booking services.

pub mod mailer;
pub mod notifier;
pub mod store;

pub use mailer::{EmailMessage, Mailer, MailerError, MailerResult};
pub use notifier::{AllocationEvent, AllocationNotifier, NotifierError, NotifierResult};
pub use store::{BookingRepository, BookingStore, StoreError, StoreResult};
