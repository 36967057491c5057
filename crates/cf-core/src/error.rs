use crate::data::DataError;

#[derive(thiserror::Error, Debug)]
pub enum ColFrameError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Statistical error: {0}")]
    Stats(String),
}

pub type Result<T> = std::result::Result<T, ColFrameError>;
