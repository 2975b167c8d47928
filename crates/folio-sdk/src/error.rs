use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("tree error: {0}")]
    Tree(#[from] folio_tree::TreeError),

    #[error("store error: {0}")]
    Store(#[from] folio_store::StoreError),

    #[error("invalid identifier: {0}")]
    Type(#[from] folio_types::TypeError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SdkResult<T> = Result<T, SdkError>;
