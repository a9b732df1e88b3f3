// --- File: crates/agenda_booking/src/lib.rs ---
pub mod dispatch;
pub mod error;
pub mod payment;
pub mod phone;
pub mod session;
pub mod staging;

pub use dispatch::{BookingDispatcher, DeepLinkDispatcher, DispatchOutcome, GatewayDispatcher};
pub use agenda_common::duration::{Price, SessionDuration};
pub use error::{BookingError, MissingField, ValidationError};
pub use payment::{settle_booking, NotConfiguredPayments, PaymentProvider, PaymentResult};
pub use session::{
    BookingRequest, BookingSelection, BookingSession, ContactForm, ContactInfo, SessionState,
};
pub use staging::{FileStagingStore, MemoryStagingStore, StagedBooking, StagingStore};
