use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use log::info;

use crate::error::ToolError;
use crate::paths::{ensure_input_exists, resolve_output_path};
use crate::pixels::wcg_to_rgba;

pub fn to_png(input: &Path, output: Option<&PathBuf>) -> Result<PathBuf, ToolError> {
    ensure_input_exists(input)?;
    let data = fs::read(input)?;
    let image = lib_wcg::decode(&data)?;
    let rgba = wcg_to_rgba(image)?;

    let out_path = resolve_output_path(input, output, "png");
    rgba.save_with_format(&out_path, ImageFormat::Png)?;
    info!("Saved PNG → {}", out_path.display());
    Ok(out_path)
}
