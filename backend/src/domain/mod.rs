//! # Domain Module
//!
//! Business logic for the gig calendar: the availability engine, the DJ's
//! agenda and the services around accounts, discovery and booking requests.
//! Nothing here knows about HTTP; storage is reached only through the
//! `DocumentStore` and `AccountStore` traits.
//!
//! ## Module Organization
//!
//! - **calendar**: month grid generation, day classification and month navigation
//! - **session**: one open calendar with its role and in-memory maps
//! - **models**: date keys, the availability and booking detail maps, error enums
//! - **schedule_service**: loads, renders, edits and persists calendars and agendas
//! - **account_service** / **profile_service**: registration, login and profiles
//! - **directory_service**: DJ listing and genre filters for clients and promoters
//! - **package_service**: the packages a DJ offers
//! - **request_service**: contact requests and promoter proposals
//! - **commands**: inputs and results passed between the IO layer and services
//!
//! ## Business Rules
//!
//! - A day is unset, available, busy or tentative; unset days are never stored
//! - Only busy and tentative days carry booking details
//! - Toggling a day to its current state clears it, unless a booking detail is
//!   saved there; then the detail is shown instead
//! - Only the owner edits a calendar; viewers see states but never details
//! - An explicit day state always wins over the "today" highlight

pub mod account_service;
pub mod calendar;
pub mod commands;
pub mod directory_service;
pub mod models;
pub mod package_service;
pub mod profile_service;
pub mod request_service;
pub mod schedule_service;
pub mod session;

pub use account_service::AccountService;
pub use calendar::CalendarService;
pub use directory_service::DirectoryService;
pub use package_service::PackageService;
pub use profile_service::ProfileService;
pub use request_service::RequestService;
pub use schedule_service::ScheduleService;
pub use session::{CalendarRole, CalendarSession, SessionError};
