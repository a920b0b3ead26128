pub mod compression;
pub mod constants;
pub mod image;

use log::*;
use std::io::Write;

pub use crate::compression::EncoderOptions;
pub use crate::image::format::{Header, PlaneKind, WcgImage};
pub use crate::image::{
    decode, encode, encode_with_options, read_blocks, read_header, DecodeError, EncodingError,
};

/// Installs the `env_logger` backend used by the tools. `RUST_LOG` overrides `level`.
pub fn init_logging(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter(Some("lib_wcg"), level)
        .filter(Some("wcg_tool"), level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .try_init();
}
