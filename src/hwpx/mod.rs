mod namespace;
mod reader;
mod xml_types;

pub use reader::HwpxReader;
