use shared::{
    AvailabilityState, CalendarMonthResponse, SaveBookingDetailRequest, ToggleAction,
    ToggleDayResponse,
};

use crate::domain::commands::schedule::{CalendarMonthView, SaveBookingDetailCommand, ToggleDayResult};
use crate::domain::models::{DetailAction, ToggleOutcome};

pub struct CalendarMapper;

impl CalendarMapper {
    pub fn to_month_response(view: CalendarMonthView) -> CalendarMonthResponse {
        CalendarMonthResponse {
            owner_id: view.owner_id,
            read_only: view.role.is_read_only(),
            cursor: view.cursor,
            month_name: view.month_name,
            weekday_headers: view.weekday_headers,
            cells: view.cells,
            previous: view.previous,
            next: view.next,
        }
    }

    /// What the client should do next for a toggle outcome
    pub fn toggle_action(outcome: &ToggleOutcome) -> ToggleAction {
        match outcome {
            ToggleOutcome::ViewDetails { .. } => ToggleAction::ShowDetail,
            ToggleOutcome::Set {
                detail: DetailAction::Prompt,
                ..
            } => ToggleAction::PromptDetail,
            _ => ToggleAction::None,
        }
    }

    pub fn to_toggle_response(result: ToggleDayResult) -> ToggleDayResponse {
        ToggleDayResponse {
            action: Self::toggle_action(&result.outcome),
            state: result
                .outcome
                .resulting_state()
                .unwrap_or(AvailabilityState::Unset),
            date_key: result.date_key,
            detail: result.detail,
        }
    }

    pub fn to_save_detail_command(date_key: String, request: SaveBookingDetailRequest) -> SaveBookingDetailCommand {
        SaveBookingDetailCommand {
            date_key,
            contact_person: request.contact_person,
            contact_phone: request.contact_phone,
            address: request.address,
            description: request.description,
        }
    }
}
