pub mod advance;
pub mod currency;
pub mod department;
pub mod doctype;
pub mod employee;
pub mod expense;
pub mod file;
pub mod leave;
pub mod user;
