pub mod signal_repository;
