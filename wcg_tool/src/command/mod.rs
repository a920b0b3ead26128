pub mod convert;
pub mod info;
pub mod to_png;
pub mod to_wcg;
