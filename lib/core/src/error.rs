use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot generate outfit for template '{template_id}': {reason}")]
    Infeasible { template_id: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Invalid item '{item_id}': {reason}")]
    InvalidItem { item_id: String, reason: String },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    #[error("Outfit not found: {0}")]
    OutfitNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn infeasible(template_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Infeasible {
            template_id: template_id.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the candidate set rather than by malformed input
    pub fn is_infeasible(&self) -> bool {
        matches!(self, Error::Infeasible { .. })
    }
}
