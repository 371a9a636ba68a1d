//! Command and result structs consumed by the domain services.

pub mod rota;
pub mod shift;
pub mod team;
pub mod template;
