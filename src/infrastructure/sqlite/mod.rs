pub mod migrations;
pub mod signal_repo;
