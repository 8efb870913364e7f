use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unable to find {0}")]
    LookupMissing(String),

    #[error("There is more than one matching {name} file ({count} found). Please delete some of them.")]
    LookupAmbiguous { name: String, count: usize },

    #[error("Unknown platform {0}")]
    UnknownPlatform(String),

    #[error("{0} cannot be empty")]
    MissingConfig(String),

    #[error("Machine error: {0}")]
    Machine(String),

    #[error("Extension host error: {0}")]
    Host(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SyncError>;
