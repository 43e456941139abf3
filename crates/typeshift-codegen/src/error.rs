use thiserror::Error;
use typeshift_core::CoreError;

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("format error: {0}")]
    Fmt(#[from] std::fmt::Error),
}
