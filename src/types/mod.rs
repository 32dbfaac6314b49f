use thiserror::Error;

mod domain_types;
mod ids;
mod rich_text;

pub use domain_types::*;
pub use ids::*;
pub use rich_text::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid Notion ID format: {0}")]
    InvalidId(String),

    #[error("Value out of bounds for {name}: {value}, expected at least {min}")]
    OutOfBounds {
        name: &'static str,
        value: usize,
        min: usize,
    },

    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },
}
