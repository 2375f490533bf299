//! Conversions between shared DTOs and domain commands and results.

pub mod account_mapper;
pub mod calendar_mapper;
pub mod request_mapper;

pub use account_mapper::AccountMapper;
pub use calendar_mapper::CalendarMapper;
pub use request_mapper::RequestMapper;
