//! HTTP API module for the schedule resolution engine.
//!
//! This module provides the REST endpoints for resolving effective
//! schedules and validating assignments. The catalog (templates and
//! periods) is server configuration; employee-specific records travel in
//! the request body.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AbsenceRecord, AssignmentRecord, ContractRecord, DayResolveRequest, ManualShiftRecord,
    OverrideRecord, RecordSet, SlotRecord, ValidateAssignmentRequest, WeekResolveRequest,
};
pub use response::ApiError;
pub use state::AppState;
