use std::fs;
use std::path::{Path, PathBuf};

use lib_wcg::{constants::FILE_EXT, EncoderOptions};
use log::info;

use crate::error::ToolError;
use crate::paths::{ensure_input_exists, resolve_output_path};
use crate::pixels::rgba_to_bgra;

pub fn to_wcg(input: &Path, output: Option<&PathBuf>, options: &EncoderOptions) -> Result<PathBuf, ToolError> {
    ensure_input_exists(input)?;
    let rgba = image::open(input)?.into_rgba8();
    let (width, height, bgra) = rgba_to_bgra(rgba);

    let encoded = lib_wcg::encode_with_options(width, height, &bgra, options)?;

    let out_path = resolve_output_path(input, output, FILE_EXT);
    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&out_path, &encoded)?;
    info!("Saved WCG → {} ({} bytes)", out_path.display(), encoded.len());
    Ok(out_path)
}
