//! Schedule service: the DJ's availability calendar and agenda.
//!
//! Orchestrates the pure calendar engine against the document store.
//!
//! ## Business Rules
//!
//! - Sessions are mutated first, then the affected map is written back whole
//!   (`merge = false`); concurrent writers are last-write-wins
//! - A failed write is reported but the session keeps the computed state
//! - Viewers never load booking details
//! - Stored details of days that are not busy or tentative are ignored
//! - Notifications are the owner's booking details, ordered by date

use chrono::NaiveDate;
use log::{error, info, warn};
use shared::{BookingDetail, CalendarCell, MonthCursor, Notification};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::calendar::CalendarService;
use crate::domain::commands::schedule::{
    CalendarMonthView, SaveBookingDetailCommand, ToggleDayCommand, ToggleDayResult,
};
use crate::domain::models::{
    AvailabilityMap, BookingDetailError, BookingDetailMap, DateKey, ScheduleError, ToggleOutcome,
};
use crate::domain::session::{CalendarRole, CalendarSession, SessionError};
use crate::storage::records::{
    BookingDetailRecord, AGENDAS, AGENDA_FIELD, AVAILABILITY_FIELD, CALENDARS,
};
use crate::storage::traits::single_field;
use crate::storage::{DocumentStore, StoreError};

/// Service for opening, rendering and editing owners' calendars
#[derive(Clone)]
pub struct ScheduleService {
    store: Arc<dyn DocumentStore>,
    calendar: CalendarService,
}

impl ScheduleService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            calendar: CalendarService::new(),
        }
    }

    pub fn calendar(&self) -> &CalendarService {
        &self.calendar
    }

    /// Create empty availability and agenda documents for a new DJ
    pub async fn provision(&self, owner_id: &str) -> Result<(), ScheduleError> {
        info!("Provisioning calendar for {}", owner_id);
        let session = CalendarSession::new(
            owner_id,
            CalendarRole::Owner,
            AvailabilityMap::new(),
            BookingDetailMap::new(),
        );
        self.persist_availability(&session).await?;
        self.persist_details(&session).await?;
        Ok(())
    }

    /// Load an owner's calendar. Missing documents read as empty maps.
    pub async fn open(&self, owner_id: &str, role: CalendarRole) -> Result<CalendarSession, ScheduleError> {
        info!("Opening calendar of {} as {:?}", owner_id, role);
        let availability = self.load_availability(owner_id).await?;
        let details = match role {
            CalendarRole::Owner => self.load_details(owner_id).await?,
            CalendarRole::Viewer => BookingDetailMap::new(),
        };
        Ok(CalendarSession::new(owner_id, role, availability, details))
    }

    /// Availability map of an owner, empty when none is stored
    pub async fn load_availability(&self, owner_id: &str) -> Result<AvailabilityMap, StoreError> {
        match self.store.get_document(CALENDARS, owner_id).await? {
            Some(document) => Ok(document
                .field::<AvailabilityMap>(AVAILABILITY_FIELD)?
                .unwrap_or_default()),
            None => Ok(AvailabilityMap::new()),
        }
    }

    async fn load_details(&self, owner_id: &str) -> Result<BookingDetailMap, StoreError> {
        let records = match self.store.get_document(AGENDAS, owner_id).await? {
            Some(document) => document
                .field::<BTreeMap<String, BookingDetailRecord>>(AGENDA_FIELD)?
                .unwrap_or_default(),
            None => BTreeMap::new(),
        };
        Ok(records
            .into_iter()
            .map(|(key, record)| {
                let detail = record.into_detail(&key);
                (key, detail)
            })
            .collect())
    }

    /// Render one month of a session
    pub fn month_view(
        &self,
        session: &CalendarSession,
        cursor: MonthCursor,
        today: NaiveDate,
    ) -> CalendarMonthView {
        let month = i32::try_from(cursor.month).unwrap_or(i32::MAX);
        let grid = self.calendar.generate_grid(cursor.year, month);
        let cursor = MonthCursor {
            year: grid.year,
            month: grid.month,
        };

        let cells = grid
            .days
            .into_iter()
            .map(|slot| CalendarCell {
                class: self.calendar.classify(&slot, session.availability(), today),
                slot,
            })
            .collect();

        CalendarMonthView {
            owner_id: session.owner_id().to_string(),
            role: session.role(),
            cursor,
            month_name: self.calendar.month_name(cursor.month).to_string(),
            weekday_headers: self
                .calendar
                .weekday_headers()
                .iter()
                .map(|h| h.to_string())
                .collect(),
            cells,
            previous: self.calendar.previous_cursor(cursor),
            next: self.calendar.next_cursor(cursor),
        }
    }

    /// Toggle a day and persist whatever changed
    pub async fn toggle_day(
        &self,
        session: &mut CalendarSession,
        command: ToggleDayCommand,
    ) -> Result<ToggleDayResult, ScheduleError> {
        info!(
            "Toggling {} to {} on calendar of {}",
            command.date_key,
            command.state,
            session.owner_id()
        );
        validate_key(&command.date_key)?;

        let detail_before = session.detail(&command.date_key).cloned();
        let outcome = session.toggle(&command.date_key, command.state)?;

        if outcome.changed_state() {
            self.persist_availability(session).await?;
        }
        if session.detail(&command.date_key) != detail_before.as_ref() {
            self.persist_details(session).await?;
        }

        let detail = match outcome {
            ToggleOutcome::ViewDetails { .. } => session.detail(&command.date_key).cloned(),
            _ => None,
        };

        Ok(ToggleDayResult {
            date_key: command.date_key,
            outcome,
            detail,
        })
    }

    /// Save contact details for a busy or tentative day
    pub async fn save_booking_detail(
        &self,
        session: &mut CalendarSession,
        command: SaveBookingDetailCommand,
    ) -> Result<BookingDetail, ScheduleError> {
        info!("Saving booking detail {} for {}", command.date_key, session.owner_id());
        validate_key(&command.date_key)?;

        let detail = BookingDetail {
            date_key: command.date_key.clone(),
            contact_person: command.contact_person,
            contact_phone: command.contact_phone,
            address: command.address,
            description: command.description,
        };
        let saved = session.save_detail(&command.date_key, detail)?;
        self.persist_details(session).await?;
        Ok(saved)
    }

    /// Remove the detail of a day; its state is kept
    pub async fn remove_booking_detail(
        &self,
        session: &mut CalendarSession,
        date_key: &str,
    ) -> Result<BookingDetail, ScheduleError> {
        info!("Removing booking detail {} for {}", date_key, session.owner_id());
        let removed = session.remove_detail(date_key)?;
        self.persist_details(session).await?;
        Ok(removed)
    }

    pub fn booking_detail(
        &self,
        session: &CalendarSession,
        date_key: &str,
    ) -> Result<BookingDetail, ScheduleError> {
        session.detail(date_key).cloned().ok_or_else(|| {
            warn!("No booking detail {} for {}", date_key, session.owner_id());
            ScheduleError::Session(SessionError::Detail(BookingDetailError::NotFound(
                date_key.to_string(),
            )))
        })
    }

    /// One notification per booking detail, earliest date first
    pub async fn notifications(&self, owner_id: &str) -> Result<Vec<Notification>, ScheduleError> {
        info!("Listing notifications for {}", owner_id);
        let session = self.open(owner_id, CalendarRole::Owner).await?;

        let mut entries: Vec<(Option<DateKey>, &BookingDetail)> = session
            .details()
            .values()
            .map(|detail| (DateKey::parse(&detail.date_key), detail))
            .collect();
        // unparseable keys sort after every real date
        entries.sort_by(|(a, da), (b, db)| match (a, b) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => da.date_key.cmp(&db.date_key),
        });

        Ok(entries.into_iter().map(|(_, d)| notification_for(d)).collect())
    }

    /// Delete the booking detail behind a notification
    pub async fn dismiss_notification(&self, owner_id: &str, date_key: &str) -> Result<(), ScheduleError> {
        info!("Dismissing notification {} for {}", date_key, owner_id);
        let mut session = self.open(owner_id, CalendarRole::Owner).await?;
        self.remove_booking_detail(&mut session, date_key).await?;
        Ok(())
    }

    async fn persist_availability(&self, session: &CalendarSession) -> Result<(), ScheduleError> {
        let fields = single_field(AVAILABILITY_FIELD, session.availability())?;
        self.store
            .set_document(CALENDARS, session.owner_id(), fields, false)
            .await
            .map_err(|e| {
                error!("Failed to save calendar of {}: {}", session.owner_id(), e);
                ScheduleError::Store(e)
            })
    }

    async fn persist_details(&self, session: &CalendarSession) -> Result<(), ScheduleError> {
        let records: BTreeMap<&str, BookingDetailRecord> = session
            .details()
            .iter()
            .map(|(key, detail)| (key, BookingDetailRecord::from(detail.clone())))
            .collect();
        let fields = single_field(AGENDA_FIELD, &records)?;
        self.store
            .set_document(AGENDAS, session.owner_id(), fields, false)
            .await
            .map_err(|e| {
                error!("Failed to save agenda of {}: {}", session.owner_id(), e);
                ScheduleError::Store(e)
            })
    }
}

/// Blank keys go to the engine, which ignores them; anything else must be a
/// real date
fn validate_key(date_key: &str) -> Result<(), ScheduleError> {
    if !date_key.is_empty() && DateKey::parse(date_key).is_none() {
        warn!("Rejected malformed date key {:?}", date_key);
        return Err(ScheduleError::InvalidDate(date_key.to_string()));
    }
    Ok(())
}

fn notification_for(detail: &BookingDetail) -> Notification {
    let mut message = format!("Date: {}", detail.date_key);
    if let Some(address) = detail.address.as_deref().filter(|a| !a.is_empty()) {
        message.push_str(&format!("\nAddress: {}", address));
    }
    if !detail.description.is_empty() {
        message.push_str(&format!("\nDescription: {}", detail.description));
    }
    Notification {
        id: detail.date_key.clone(),
        client_name: detail.contact_person.clone(),
        phone: detail.contact_phone.clone(),
        message,
    }
}
