pub mod registration_mail;
pub mod submit_registration_usecase;
