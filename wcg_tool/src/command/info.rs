use std::fs;
use std::path::Path;

use lib_wcg::compression::index_code::prefix_width;
use lib_wcg::PlaneKind;

use crate::error::ToolError;
use crate::paths::ensure_input_exists;

/// Prints header and block metadata without decoding pixels.
pub fn info(input: &Path) -> Result<(), ToolError> {
    ensure_input_exists(input)?;
    let data = fs::read(input)?;
    let (header, blocks) = lib_wcg::read_blocks(&data)?;

    println!("{}", input.display());
    println!("  size:    {}x{}", header.width, header.height);
    println!("  depth:   {}", header.depth);
    for (kind, block) in PlaneKind::ORDER.into_iter().zip(&blocks) {
        println!("  {}:", kind);
        println!("    plane size:   {} bytes", block.plane_size);
        println!("    palette:      {} entries", block.palette.len());
        println!("    prefix width: {} bits", prefix_width(block.palette.len()));
        println!("    bitstream:    {} bytes", block.bitstream.len());
    }
    Ok(())
}
