use shared::{ContactRequest, ProposalRequest, SubmitRequestResponse};

use crate::domain::commands::requests::{ContactRequestCommand, ProposalCommand, SubmitRequestResult};

pub struct RequestMapper;

impl RequestMapper {
    pub fn to_contact_command(request: ContactRequest) -> ContactRequestCommand {
        ContactRequestCommand {
            event_type: request.event_type,
            event_date: request.event_date,
            phone: request.phone,
        }
    }

    pub fn to_proposal_command(request: ProposalRequest) -> ProposalCommand {
        ProposalCommand {
            event_type: request.event_type,
            event_date: request.event_date,
            venue: request.venue,
            budget: request.budget,
            phone: request.phone,
            start_time: request.start_time,
            end_time: request.end_time,
            estimated_guests: request.estimated_guests,
            details: request.details,
        }
    }

    pub fn to_submit_response(result: SubmitRequestResult) -> SubmitRequestResponse {
        SubmitRequestResponse {
            request_id: result.request_id,
            success_message: result.success_message,
        }
    }
}
