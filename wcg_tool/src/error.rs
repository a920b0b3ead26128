use std::io;
use std::path::PathBuf;

use image::ImageError;
use lib_wcg::{DecodeError, EncodingError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Input not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Image is too large for the WCG format: {width}x{height}")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),

    #[error("WCG decode error: {0}")]
    DecodeError(#[from] DecodeError),

    #[error("WCG encode error: {0}")]
    EncodeError(#[from] EncodingError),

    #[error("{failed} of {total} files failed to convert")]
    BatchFailed { failed: usize, total: usize },
}
