pub mod cfb;
pub mod stream;

pub use self::cfb::CfbReader;
pub use self::stream::StreamReader;

use crate::error::Result;

/// A named-stream container: the interface the document assembler needs
/// from the OLE2 layer (or a stand-in, for tests).
pub trait StreamContainer {
    fn list_streams(&self) -> Vec<String>;
    fn read_stream(&mut self, name: &str) -> Result<Vec<u8>>;
}

impl<F: std::io::Read + std::io::Seek> StreamContainer for CfbReader<F> {
    fn list_streams(&self) -> Vec<String> {
        CfbReader::list_streams(self)
    }

    fn read_stream(&mut self, name: &str) -> Result<Vec<u8>> {
        CfbReader::read_stream(self, name)
    }
}
