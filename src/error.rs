use thiserror::Error;

use crate::executer::ExecuteError;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("Failed to decode identity token")]
    Decode,
    #[error("Failed to deserialize identity token")]
    Deserialize,
    #[error("Token audience does not match the configured client id")]
    AudienceNotMatch,
    #[error("No identity token in the request")]
    MissingToken,
    #[error("Failed to read server config: {0}")]
    Config(String),
    #[error("Failed to read template: {0}")]
    Template(String),
    #[error(transparent)]
    Execute(#[from] ExecuteError),
}
