use std::path::{Path, PathBuf};

use lib_wcg::EncoderOptions;
use log::{error, info, warn};
use rayon::prelude::*;

use super::{to_png::to_png, to_wcg::to_wcg};
use crate::error::ToolError;
use crate::paths::{conversion_for, Conversion};

/// Converts every path next to itself, picking the direction from its extension.
pub fn convert(paths: &[PathBuf], options: &EncoderOptions) -> Result<(), ToolError> {
    let failed = paths
        .par_iter()
        .filter(|path| match convert_one(path, options) {
            Ok(()) => false,
            Err(e) => {
                error!("{}: {}", path.display(), e);
                true
            }
        })
        .count();

    info!("Converted {} of {} files", paths.len() - failed, paths.len());
    if failed > 0 {
        return Err(ToolError::BatchFailed {
            failed,
            total: paths.len(),
        });
    }
    Ok(())
}

fn convert_one(path: &Path, options: &EncoderOptions) -> Result<(), ToolError> {
    match conversion_for(path) {
        Some(Conversion::ToPng) => to_png(path, None).map(|_| ()),
        Some(Conversion::ToWcg) => to_wcg(path, None, options).map(|_| ()),
        None => {
            warn!("Skipping {}: unsupported file format", path.display());
            Ok(())
        }
    }
}
