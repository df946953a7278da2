use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Log file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Top list length must be a positive integer, got {0}")]
    InvalidTopN(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
