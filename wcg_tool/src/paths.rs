use std::path::{Path, PathBuf};

use crate::error::ToolError;

/// Output path: the explicit one, or the input with its extension replaced.
pub fn resolve_output_path(input: &Path, provided: Option<&PathBuf>, ext: &str) -> PathBuf {
    if let Some(p) = provided {
        return p.clone();
    }
    input.with_extension(ext)
}

pub fn ensure_input_exists(input: &Path) -> Result<(), ToolError> {
    if !input.is_file() {
        return Err(ToolError::InputNotFound(input.to_path_buf()));
    }
    Ok(())
}

/// What a batch conversion does with a file, judged by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    ToPng,
    ToWcg,
}

pub fn conversion_for(path: &Path) -> Option<Conversion> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        lib_wcg::constants::FILE_EXT => Some(Conversion::ToPng),
        "png" | "jpg" | "jpeg" | "bmp" => Some(Conversion::ToWcg),
        _ => None,
    }
}
