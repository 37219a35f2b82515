pub mod currency;
pub mod doctype;
pub mod expense;
pub mod file;
pub mod leave;
pub mod session;
