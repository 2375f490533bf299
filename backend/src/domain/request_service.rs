//! Booking requests sent to DJs.
//!
//! ## Key Responsibilities
//!
//! - Client contact requests: event type, date and a phone number
//! - Promoter proposals: venue, budget and optional scheduling details
//! - The DJ's inbox, newest request first
//!
//! ## Business Rules
//!
//! - The addressed user must exist and be a DJ
//! - Requests are stored unread with their submission time
//! - The sender is named by their profile, or by role when no name is on file

use chrono::{DateTime, FixedOffset, Utc};
use log::{info, warn};
use serde_json::Value;
use shared::{BookingRequest, UserRole};
use std::sync::Arc;

use crate::domain::commands::requests::{ContactRequestCommand, ProposalCommand, SubmitRequestResult};
use crate::domain::models::RequestError;
use crate::domain::profile_service::ProfileService;
use crate::storage::records::{RequestRecord, REQUESTS, REQUEST_DJ_FIELD};
use crate::storage::traits::to_fields;
use crate::storage::DocumentStore;

const NOT_SPECIFIED: &str = "Not specified";
const NO_DETAILS: &str = "No additional details";
const PROPOSAL_KIND: &str = "promotor";

#[derive(Clone)]
pub struct RequestService {
    store: Arc<dyn DocumentStore>,
    profiles: ProfileService,
}

impl RequestService {
    pub fn new(store: Arc<dyn DocumentStore>, profiles: ProfileService) -> Self {
        Self { store, profiles }
    }

    pub async fn submit_contact(
        &self,
        client_uid: &str,
        dj_id: &str,
        command: ContactRequestCommand,
    ) -> Result<SubmitRequestResult, RequestError> {
        info!("Contact request from {} to DJ {}", client_uid, dj_id);
        if [&command.event_type, &command.event_date, &command.phone]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(RequestError::MissingFields);
        }
        self.ensure_dj(dj_id).await?;

        let sender = self.profiles.find_profile(client_uid).await?;
        let record = RequestRecord {
            dj_id: dj_id.to_string(),
            nombre_cliente: sender_name(sender.as_ref().and_then(|p| p.first_name.as_deref()), "Client"),
            empresa: None,
            tipo_evento: command.event_type,
            fecha_evento: command.event_date,
            lugar_evento: None,
            presupuesto: None,
            hora_inicio: None,
            hora_fin: None,
            personas_estimadas: None,
            detalles_evento: None,
            telefono: command.phone,
            fecha: Utc::now().to_rfc3339(),
            leido: false,
            tipo_solicitud: None,
        };

        let request_id = self.store.add_document(REQUESTS, to_fields(&record)?).await?;
        info!("Stored contact request {}", request_id);
        Ok(SubmitRequestResult {
            request_id,
            success_message: "Request sent successfully! The DJ will contact you soon.".to_string(),
        })
    }

    pub async fn submit_proposal(
        &self,
        promoter_uid: &str,
        dj_id: &str,
        command: ProposalCommand,
    ) -> Result<SubmitRequestResult, RequestError> {
        info!("Proposal from {} to DJ {}", promoter_uid, dj_id);
        let required = [
            &command.event_type,
            &command.event_date,
            &command.venue,
            &command.phone,
            &command.budget,
        ];
        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(RequestError::MissingFields);
        }
        self.ensure_dj(dj_id).await?;

        let sender = self.profiles.find_profile(promoter_uid).await?;
        let record = RequestRecord {
            dj_id: dj_id.to_string(),
            nombre_cliente: sender_name(sender.as_ref().and_then(|p| p.first_name.as_deref()), "Promoter"),
            empresa: Some(sender.and_then(|p| p.company).unwrap_or_default()),
            tipo_evento: command.event_type,
            fecha_evento: command.event_date,
            lugar_evento: Some(command.venue),
            presupuesto: Some(command.budget),
            hora_inicio: Some(or_default(command.start_time, NOT_SPECIFIED)),
            hora_fin: Some(or_default(command.end_time, NOT_SPECIFIED)),
            personas_estimadas: Some(or_default(command.estimated_guests, NOT_SPECIFIED)),
            detalles_evento: Some(or_default(command.details, NO_DETAILS)),
            telefono: command.phone,
            fecha: Utc::now().to_rfc3339(),
            leido: false,
            tipo_solicitud: Some(PROPOSAL_KIND.to_string()),
        };

        let request_id = self.store.add_document(REQUESTS, to_fields(&record)?).await?;
        info!("Stored proposal {}", request_id);
        Ok(SubmitRequestResult {
            request_id,
            success_message: "Proposal sent successfully! The DJ will review your request soon.".to_string(),
        })
    }

    /// Requests addressed to a DJ, newest first
    pub async fn requests_for_dj(&self, dj_id: &str) -> Result<Vec<BookingRequest>, RequestError> {
        let documents = self
            .store
            .query_documents(REQUESTS, REQUEST_DJ_FIELD, &Value::String(dj_id.to_string()))
            .await?;

        let mut requests = Vec::with_capacity(documents.len());
        for document in documents {
            match document.decode::<RequestRecord>() {
                Ok(record) => requests.push(record.into_request(&document.key)),
                Err(e) => warn!("Skipping unreadable request {}: {}", document.key, e),
            }
        }
        requests.sort_by(|a, b| sent_at(b).cmp(&sent_at(a)));
        info!("Found {} requests for DJ {}", requests.len(), dj_id);
        Ok(requests)
    }

    async fn ensure_dj(&self, dj_id: &str) -> Result<(), RequestError> {
        if dj_id.trim().is_empty() {
            return Err(RequestError::UnknownDj(dj_id.to_string()));
        }
        match self.profiles.find_profile(dj_id).await? {
            Some(profile) if profile.role == UserRole::Dj => Ok(()),
            _ => {
                warn!("Request addressed to unknown DJ {}", dj_id);
                Err(RequestError::UnknownDj(dj_id.to_string()))
            }
        }
    }
}

fn sender_name(name: Option<&str>, fallback: &str) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => fallback.to_string(),
    }
}

fn or_default(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn sent_at(request: &BookingRequest) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(&request.sent_at).ok()
}
