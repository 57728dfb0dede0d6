pub mod registration_repository;
