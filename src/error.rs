use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No cache location available")]
    NoCacheDir,

    #[error("No item named '{0}'")]
    UnknownItem(String),
}

pub type Result<T> = std::result::Result<T, MenuError>;
