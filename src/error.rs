use thiserror::Error;

#[derive(Error, Debug)]
pub enum PickerError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::DeError),
    #[error("Task error: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("Collection for {owner} is still being generated")]
    Processing { owner: String },
    #[error("Status {status} for {target}")]
    Status { target: String, status: u16 },
    #[error("Request for {owner} rejected: {message}")]
    Upstream { owner: String, message: String },
    #[error("Not found or took too long after {attempts} attempts")]
    RetryBudgetExhausted { attempts: u32 },
    #[error("Fetch cycle superseded by a newer request")]
    Superseded,
    #[error("No usernames given")]
    NoOwners,
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
}

pub type Result<T> = std::result::Result<T, PickerError>;
