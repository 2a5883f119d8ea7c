use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("variable '{0}' is not a text field of the tractor schema")]
    UnknownVariable(String),
    #[error("'{0}' identifies the record and is set at the top level, not extracted")]
    IdentityField(String),
    #[error("{0}")]
    InvalidFile(String),
    #[error("{0}")]
    InvalidDirectory(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
