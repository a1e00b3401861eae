use std::string::FromUtf8Error;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("generated markup is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
    #[error("chart error: {0}")]
    Chart(String),
    #[error("print error: {0}")]
    Print(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
