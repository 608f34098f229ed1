use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControlError {
    #[error("malformed observation: field `{field}` {problem}")]
    MalformedObservation {
        field:   &'static str,
        problem: &'static str,
    },
}

impl ControlError {
    pub(crate) fn missing(field: &'static str) -> Self {
        ControlError::MalformedObservation { field, problem: "is missing" }
    }
}

pub type ControlResult<T> = Result<T, ControlError>;
