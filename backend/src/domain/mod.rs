//! # Domain Module
//!
//! Business logic for the shift planner: rota expansion, preview sessions,
//! and management of template sets, shifts, employees and locations.
//!
//! ## Module Organization
//!
//! - **rota_service**: Template expansion, conflict detection, persistence shaping
//! - **preview**: Preview session state machine with generation tracking
//! - **template_service**: Template set CRUD and validation
//! - **shift_service**: Persisted shift queries and post-confirm edits
//! - **employee_service** / **location_service**: Team reference data
//! - **reference_cache**: TTL cache over employees and locations
//!
//! Services are storage-backed but UI agnostic; the REST layer translates
//! between DTOs and the command structs in [`commands`].

pub mod commands;
pub mod employee_service;
pub mod error;
pub mod location_service;
pub mod models;
pub mod preview;
pub mod reference_cache;
pub mod rota_service;
pub mod shift_service;
pub mod template_service;

pub use employee_service::EmployeeService;
pub use error::ValidationError;
pub use location_service::LocationService;
pub use preview::PreviewService;
pub use reference_cache::ReferenceCache;
pub use rota_service::RotaService;
pub use shift_service::ShiftService;
pub use template_service::TemplateService;
