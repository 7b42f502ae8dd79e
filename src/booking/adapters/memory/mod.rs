//! In-memory adapters for room booking.

mod mailer;
mod notifier;
mod store;

pub use mailer::InMemoryMailer;
pub use notifier::RecordingNotifier;
pub use store::InMemoryBookingRepository;
