//! Business rules on top of the storage traits. Handlers call into these
//! and only translate the results to HTTP.

pub mod approval;
pub mod currency;
pub mod expense;
pub mod leave;
pub mod upload;
