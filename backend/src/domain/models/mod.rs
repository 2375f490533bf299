pub mod availability;
pub mod booking_detail;
pub mod date_key;
pub mod errors;

pub use availability::{AvailabilityMap, DetailAction, ToggleOutcome};
pub use booking_detail::{BookingDetailError, BookingDetailMap};
pub use date_key::DateKey;
pub use errors::{AccountError, PackageError, ProfileError, RequestError, ScheduleError};
