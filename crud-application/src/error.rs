use crud_domain::{error::DomainError, validation::ValidationResult};

#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("domain: {0}")]
    Domain(#[from] DomainError),

    #[error("validation: {}", join_messages(.0))]
    Validation(Vec<ValidationResult>),

    #[error("config: {key}={value}: {reason}")]
    Config {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl AppError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Domain(e) if e.is_not_found())
    }
}

fn join_messages(errors: &[ValidationResult]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
