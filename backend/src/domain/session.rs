//! One opened calendar: the owner's availability map and booking details,
//! plus the role of whoever opened it.

use log::{debug, warn};
use shared::{AvailabilityState, BookingDetail};

use crate::domain::models::{
    AvailabilityMap, BookingDetailError, BookingDetailMap, ToggleOutcome,
};

/// Access level on a calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarRole {
    /// The DJ who owns the calendar; may toggle days and edit details
    Owner,
    /// A promoter or client; read-only, never sees booking details
    Viewer,
}

impl CalendarRole {
    pub fn is_read_only(self) -> bool {
        matches!(self, CalendarRole::Viewer)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("This calendar is read-only")]
    ReadOnly,
    #[error(transparent)]
    Detail(#[from] BookingDetailError),
}

/// In-memory state of one owner's calendar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSession {
    owner_id: String,
    role: CalendarRole,
    availability: AvailabilityMap,
    details: BookingDetailMap,
}

impl CalendarSession {
    /// Viewer sessions drop any details passed in. Owner sessions drop
    /// details of days that are not busy or tentative, and addresses of days
    /// that are not busy.
    pub fn new(
        owner_id: &str,
        role: CalendarRole,
        availability: AvailabilityMap,
        details: BookingDetailMap,
    ) -> Self {
        let details = match role {
            CalendarRole::Owner => consistent_details(owner_id, &availability, details),
            CalendarRole::Viewer => BookingDetailMap::new(),
        };
        Self {
            owner_id: owner_id.to_string(),
            role,
            availability,
            details,
        }
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn role(&self) -> CalendarRole {
        self.role
    }

    pub fn availability(&self) -> &AvailabilityMap {
        &self.availability
    }

    pub fn details(&self) -> &BookingDetailMap {
        &self.details
    }

    pub fn detail(&self, key: &str) -> Option<&BookingDetail> {
        self.details.get(key)
    }

    fn ensure_writable(&self) -> Result<(), SessionError> {
        if self.role.is_read_only() {
            warn!("Rejected write on read-only calendar of {}", self.owner_id);
            return Err(SessionError::ReadOnly);
        }
        Ok(())
    }

    /// Toggle a day and keep the detail map consistent with the result
    pub fn toggle(
        &mut self,
        key: &str,
        requested: AvailabilityState,
    ) -> Result<ToggleOutcome, SessionError> {
        self.ensure_writable()?;

        let has_detail = self.details.contains(key);
        let outcome = self.availability.toggle(key, requested, has_detail);
        if outcome.removes_detail() && self.details.remove(key).is_some() {
            debug!("Dropped booking detail for {} after {:?}", key, outcome);
        }
        if outcome.resulting_state() == Some(AvailabilityState::Tentative)
            && self.details.clear_address(key)
        {
            debug!("Dropped address of {} now that it is tentative", key);
        }
        Ok(outcome)
    }

    /// Save contact details for a busy or tentative day. The address is only
    /// kept for busy days.
    pub fn save_detail(
        &mut self,
        key: &str,
        mut detail: BookingDetail,
    ) -> Result<BookingDetail, SessionError> {
        self.ensure_writable()?;
        if key.is_empty() {
            return Err(BookingDetailError::EmptyKey.into());
        }

        let state = self.availability.get(key);
        if !state.requires_booking_detail() {
            return Err(BookingDetailError::NotBookable {
                date_key: key.to_string(),
                state,
            }
            .into());
        }
        if state != AvailabilityState::Busy {
            detail.address = None;
        }

        self.details.upsert(key, detail)?;
        self.details
            .get(key)
            .cloned()
            .ok_or_else(|| BookingDetailError::NotFound(key.to_string()).into())
    }

    /// Remove the detail at `key`; the day keeps its state
    pub fn remove_detail(&mut self, key: &str) -> Result<BookingDetail, SessionError> {
        self.ensure_writable()?;
        self.details
            .remove(key)
            .ok_or_else(|| BookingDetailError::NotFound(key.to_string()).into())
    }
}

fn consistent_details(
    owner_id: &str,
    availability: &AvailabilityMap,
    mut details: BookingDetailMap,
) -> BookingDetailMap {
    details.retain(|key, _| {
        let state = availability.get(key);
        if !state.requires_booking_detail() {
            warn!("Dropping booking detail {} of {}: day is {}", key, owner_id, state);
            return false;
        }
        true
    });

    let tentative: Vec<String> = details
        .iter()
        .filter(|(key, _)| availability.get(key) == AvailabilityState::Tentative)
        .map(|(key, _)| key.to_string())
        .collect();
    for key in tentative {
        if details.clear_address(&key) {
            warn!("Dropping address of tentative day {} of {}", key, owner_id);
        }
    }
    details
}
