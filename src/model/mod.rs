pub mod document;

pub use self::document::{Document, Paragraph, Section, SectionItem, Table, Version};
