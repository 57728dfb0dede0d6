pub mod entity;
pub mod registration_repository;
pub mod sendgrid_email_sender;
