//! Assembles the bytes that get published: an optional header line followed by the input.

use crate::error::Result;
use std::io::{Cursor, Read};

/// Prefixes `input` with `head` and a newline, unless `head` is empty.
///
/// The input is chained, not copied, so it can be a live stream of unknown length.
pub fn assemble<'a, R: Read + 'a>(head: &str, input: R) -> Box<dyn Read + 'a> {
    if head.is_empty() {
        return Box::new(input);
    }
    let mut prefix = Vec::with_capacity(head.len() + 1);
    prefix.extend_from_slice(head.as_bytes());
    prefix.push(b'\n');
    Box::new(Cursor::new(prefix).chain(input))
}

/// Drains `reader` into memory.
pub fn read_all<R: Read>(mut reader: R) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    tracing::debug!(bytes = buf.len(), "Input read");
    Ok(buf)
}
