pub mod briefing;
pub mod clustering;
pub mod collect;
pub mod dashboard;
pub mod radar;
pub mod stats;
