use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlowError {
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, FlowError>;

impl FlowError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        FlowError::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}
