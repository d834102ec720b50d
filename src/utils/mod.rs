pub mod compression;
pub mod encoding;
