use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),
    #[error("Invalid month key: {0}")]
    InvalidMonthKey(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
