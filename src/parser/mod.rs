pub mod document;
pub mod header;
pub mod record;
pub mod section;
pub mod text;

pub use self::document::assemble_document;
pub use self::header::FileHeader;
pub use self::record::{HwpTag, Record, RecordReader};
pub use self::section::SectionAssembler;
