pub mod registration;
pub mod seminar;
