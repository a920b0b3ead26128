pub mod decoder;
pub mod encoder;
pub mod format;

pub use decoder::{decode, read_blocks, read_header, DecodeError};
pub use encoder::{encode, encode_with_options, EncodingError};
