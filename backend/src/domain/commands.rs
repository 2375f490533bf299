//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the DTOs defined in the
//! `shared` crate to these internal types.

pub mod schedule {
    use crate::domain::models::ToggleOutcome;
    use crate::domain::session::CalendarRole;
    use shared::{AvailabilityState, BookingDetail, CalendarCell, MonthCursor};

    /// Input for toggling one day of the owner's calendar.
    #[derive(Debug, Clone)]
    pub struct ToggleDayCommand {
        pub date_key: String,
        pub state: AvailabilityState,
    }

    /// Result of a toggle, carrying the existing detail on the view path.
    #[derive(Debug, Clone)]
    pub struct ToggleDayResult {
        pub date_key: String,
        pub outcome: ToggleOutcome,
        pub detail: Option<BookingDetail>,
    }

    /// Input for saving the contact details of a busy or tentative day.
    #[derive(Debug, Clone)]
    pub struct SaveBookingDetailCommand {
        pub date_key: String,
        pub contact_person: String,
        pub contact_phone: String,
        pub address: Option<String>,
        pub description: String,
    }

    /// Rendered month of one calendar.
    #[derive(Debug, Clone)]
    pub struct CalendarMonthView {
        pub owner_id: String,
        pub role: CalendarRole,
        pub cursor: MonthCursor,
        pub month_name: String,
        pub weekday_headers: Vec<String>,
        pub cells: Vec<CalendarCell>,
        pub previous: MonthCursor,
        pub next: MonthCursor,
    }
}

pub mod accounts {
    use crate::storage::Credential;
    use shared::{UserProfile, UserRole};

    /// Input for creating an account and its profile.
    #[derive(Debug, Clone)]
    pub struct RegisterCommand {
        pub email: String,
        pub password: String,
        pub confirm: String,
        pub role: UserRole,
        pub first_name: Option<String>,
        pub last_name: Option<String>,
        pub national_id: Option<String>,
        pub district: Option<String>,
        pub province: Option<String>,
        pub department: Option<String>,
        pub company: Option<String>,
        pub address: Option<String>,
        pub tax_id: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct RegisterResult {
        pub credential: Credential,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct LoginResult {
        pub credential: Credential,
        pub profile: Option<UserProfile>,
        pub landing_route: String,
    }
}

pub mod profiles {
    /// Editable part of a DJ profile; `None` leaves a field untouched.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateDjProfileCommand {
        pub stage_name: Option<String>,
        pub description: Option<String>,
        pub genres: Option<Vec<String>>,
        pub rider: Option<String>,
    }
}

pub mod directory {
    /// Optional filters for DJ discovery; both are case-insensitive substrings.
    #[derive(Debug, Clone, Default)]
    pub struct DjFilter {
        pub genre: Option<String>,
        pub name: Option<String>,
    }
}

pub mod requests {
    #[derive(Debug, Clone)]
    pub struct ContactRequestCommand {
        pub event_type: String,
        pub event_date: String,
        pub phone: String,
    }

    #[derive(Debug, Clone)]
    pub struct ProposalCommand {
        pub event_type: String,
        pub event_date: String,
        pub venue: String,
        pub budget: String,
        pub phone: String,
        pub start_time: Option<String>,
        pub end_time: Option<String>,
        pub estimated_guests: Option<String>,
        pub details: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct SubmitRequestResult {
        pub request_id: String,
        pub success_message: String,
    }
}
