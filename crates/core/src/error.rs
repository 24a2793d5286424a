use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PaperdownError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
