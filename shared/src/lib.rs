use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Booking state of a single calendar day.
///
/// `Unset` is the absence of an entry in a persisted availability map. It is
/// modelled explicitly so callers can request "clear this day" and so the
/// state machine stays total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityState {
    Available,
    Busy,
    Tentative,
    Unset,
}

impl AvailabilityState {
    /// Whether this state has a stored representation
    pub fn is_set(self) -> bool {
        !matches!(self, AvailabilityState::Unset)
    }

    /// Busy and tentative days carry a booking detail record
    pub fn requires_booking_detail(self) -> bool {
        matches!(self, AvailabilityState::Busy | AvailabilityState::Tentative)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AvailabilityState::Available => "available",
            AvailabilityState::Busy => "busy",
            AvailabilityState::Tentative => "tentative",
            AvailabilityState::Unset => "unset",
        }
    }
}

impl fmt::Display for AvailabilityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cell of a displayed month grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySlot {
    /// 0 for leading padding, otherwise 1..=31
    pub day_number: u32,
    /// `"{year}-{month+1}-{day}"`, empty for padding
    pub date_key: String,
}

impl DaySlot {
    pub fn blank() -> Self {
        Self {
            day_number: 0,
            date_key: String::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.day_number == 0
    }
}

/// Ordered cells for one month, leading blanks first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarGrid {
    pub year: i32,
    /// Zero-based month (0 = January)
    pub month: u32,
    /// Weekday of the 1st (0 = Sunday)
    pub first_weekday: u32,
    pub days: Vec<DaySlot>,
}

impl CalendarGrid {
    /// Number of non-padding cells
    pub fn day_count(&self) -> usize {
        self.days.iter().filter(|d| !d.is_blank()).count()
    }
}

/// How a calendar cell should be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayClass {
    Padding,
    Busy,
    Available,
    Tentative,
    Today,
    Default,
}

impl DisplayClass {
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayClass::Padding => "padding",
            DisplayClass::Busy => "busy",
            DisplayClass::Available => "available",
            DisplayClass::Tentative => "tentative",
            DisplayClass::Today => "today",
            DisplayClass::Default => "default",
        }
    }

    /// Markup class list used by the calendar views
    pub fn css_class(self) -> &'static str {
        match self {
            DisplayClass::Padding | DisplayClass::Default => "calendar-day",
            DisplayClass::Busy => "calendar-day day-busy",
            DisplayClass::Available => "calendar-day day-available",
            DisplayClass::Tentative => "calendar-day day-tentative",
            DisplayClass::Today => "calendar-day day-today",
        }
    }
}

/// Month currently shown by a calendar view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCursor {
    pub year: i32,
    /// Zero-based month (0 = January)
    pub month: u32,
}

impl Default for MonthCursor {
    fn default() -> Self {
        let now = chrono::Local::now();
        Self {
            year: now.year(),
            month: now.month0(),
        }
    }
}

/// Contact and venue information attached to a busy or tentative day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDetail {
    pub date_key: String,
    pub contact_person: String,
    pub contact_phone: String,
    /// Only kept for busy days
    pub address: Option<String>,
    pub description: String,
}

/// Cell plus its computed display class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub slot: DaySlot,
    pub class: DisplayClass,
}

/// Response for GET /api/calendars/:owner_id/month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMonthResponse {
    pub owner_id: String,
    pub read_only: bool,
    pub cursor: MonthCursor,
    pub month_name: String,
    pub weekday_headers: Vec<String>,
    pub cells: Vec<CalendarCell>,
    pub previous: MonthCursor,
    pub next: MonthCursor,
}

/// Request to toggle one day to the owner's selected state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleDayRequest {
    pub state: AvailabilityState,
}

/// What the view should do after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleAction {
    /// Nothing further; day state changed or cleared
    None,
    /// Show the booking detail form for a new entry
    PromptDetail,
    /// Show the existing booking detail
    ShowDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleDayResponse {
    pub date_key: String,
    pub state: AvailabilityState,
    pub action: ToggleAction,
    /// Existing detail when `action` is `ShowDetail`
    pub detail: Option<BookingDetail>,
}

/// Body for PUT /api/calendars/:owner_id/details/:date_key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveBookingDetailRequest {
    pub contact_person: String,
    pub contact_phone: String,
    pub address: Option<String>,
    pub description: String,
}

/// A booking detail presented as a dashboard notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Date key of the underlying booking detail
    pub id: String,
    pub client_name: String,
    pub phone: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<Notification>,
}

/// Kind of account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Dj,
    Client,
    Promoter,
}

impl UserRole {
    /// Route the client lands on after login
    pub fn landing_route(self) -> &'static str {
        match self {
            UserRole::Dj => "/homedj",
            UserRole::Promoter => "/homepromotor",
            UserRole::Client => "/homecliente",
        }
    }
}

/// Public profile of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub role: UserRole,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub district: Option<String>,
    pub province: Option<String>,
    pub department: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
    pub stage_name: Option<String>,
    pub description: Option<String>,
    pub genres: Vec<String>,
    pub rider: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
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

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: String,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
    pub landing_route: String,
    pub profile: Option<UserProfile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDjProfileRequest {
    pub stage_name: Option<String>,
    pub description: Option<String>,
    pub genres: Option<Vec<String>>,
    pub rider: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DjListResponse {
    pub djs: Vec<UserProfile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreListResponse {
    pub genres: Vec<String>,
}

/// A DJ's offered package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub icon: Option<String>,
    pub title: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageListResponse {
    pub packages: Vec<Package>,
}

/// Who sent a booking request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Client,
    Promoter,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub event_type: String,
    pub event_date: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRequest {
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

/// A contact request or proposal addressed to a DJ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub id: String,
    pub dj_id: String,
    pub kind: RequestKind,
    pub sender_name: String,
    pub company: Option<String>,
    pub event_type: String,
    pub event_date: String,
    pub venue: Option<String>,
    pub budget: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub estimated_guests: Option<String>,
    pub details: Option<String>,
    pub phone: String,
    /// RFC 3339 submission time
    pub sent_at: String,
    pub read: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRequestResponse {
    pub request_id: String,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequestListResponse {
    pub requests: Vec<BookingRequest>,
}

/// Error body returned by every failing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
