use crate::domain::error::DomainError;
use crate::domain::ports::signal_repository::{SignalRepository, SignalStats};
use std::sync::Arc;

pub struct StatsUseCase {
    repo: Arc<dyn SignalRepository>,
}

impl StatsUseCase {
    pub fn new(repo: Arc<dyn SignalRepository>) -> Self {
        Self { repo }
    }

    pub fn stats(&self) -> Result<SignalStats, DomainError> {
        self.repo.stats()
    }
}
