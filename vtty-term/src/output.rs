/// Capacity of the outbound buffer.
const OUTPUT_BUFFER_SIZE: usize = 1024;

/// Bounded buffer for bytes headed to the child: escape replies and
/// encoded keystrokes. An append that would overflow is dropped whole,
/// preserving backpressure instead of growing without limit.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    buffer: Vec<u8>,
}

impl OutputBuffer {
    pub fn append(&mut self, bytes: &[u8]) {
        if self.buffer.len() + bytes.len() <= OUTPUT_BUFFER_SIZE {
            self.buffer.extend_from_slice(bytes);
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Discard the first `count` bytes after a (possibly partial) write.
    pub fn consume(&mut self, count: usize) {
        self.buffer.drain(..count.min(self.buffer.len()));
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_consume_compacts() {
        let mut out = OutputBuffer::default();
        out.append(b"abcdef");
        out.consume(2);
        assert_eq!(out.as_slice(), b"cdef");
    }

    #[test]
    fn overflowing_append_is_dropped_whole() {
        let mut out = OutputBuffer::default();
        out.append(&[b'x'; OUTPUT_BUFFER_SIZE - 2]);
        out.append(b"abc");
        assert_eq!(out.len(), OUTPUT_BUFFER_SIZE - 2);
        out.append(b"ab");
        assert_eq!(out.len(), OUTPUT_BUFFER_SIZE);
    }
}
