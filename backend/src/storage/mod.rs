//! # Storage layer
//!
//! One repository per entity, all backed by the shared SQLite pool.
//! Repositories translate between database rows and chrono-typed domain
//! models; the domain services never see sqlx types.

pub mod employee_repository;
pub mod location_repository;
pub mod shift_repository;
pub mod template_repository;

pub use employee_repository::EmployeeRepository;
pub use location_repository::LocationRepository;
pub use shift_repository::ShiftRepository;
pub use template_repository::TemplateRepository;
