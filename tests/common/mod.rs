use std::io;
use std::io::Write;
use std::str::from_utf8;

use serde::Deserialize;

/// Collects everything a logger writes.
pub struct DebugWriter(pub String);
impl Write for DebugWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let DebugWriter(inner) = self;
        let buf = from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        inner.push_str(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct Message {
    pub message: String,
}
