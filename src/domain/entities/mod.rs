pub mod cluster;
pub mod signal;
pub mod trend;
