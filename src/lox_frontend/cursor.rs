/// Byte-oriented view over the source buffer.
///
/// Every byte is treated as one character (Latin-1), so multi-byte UTF-8
/// sequences are seen as several unrelated characters.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    source: &'src [u8],
    byte_pos: usize,
    line_no: usize,
}

impl<'src> Cursor<'src> {
    /// Creates a byte stream for the source buffer.
    pub fn new(source: &'src [u8]) -> Self {
        Cursor {
            source,
            byte_pos: 0,
            line_no: 1,
        }
    }

    /// Byte offset of the next unconsumed byte.
    pub fn byte_pos(&self) -> usize {
        self.byte_pos
    }

    /// 1-based line of the next unconsumed byte.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    pub fn is_at_end(&self) -> bool {
        self.byte_pos >= self.source.len()
    }

    /// Peeks the next byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.source.get(self.byte_pos).copied()
    }

    /// Peeks the next to next byte without consuming it.
    pub fn peek_next(&self) -> Option<u8> {
        self.source.get(self.byte_pos + 1).copied()
    }

    /// Consumes the next byte.
    pub fn take(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.byte_pos += 1;
        if byte == b'\n' {
            self.line_no += 1;
        }
        Some(byte)
    }

    /// Consumes the next byte if it equals target byte.
    pub fn take_if(&mut self, target: u8) -> bool {
        match self.peek() {
            Some(byte) if byte == target => {
                self.take();
                true
            }
            _ => false,
        }
    }

    /// Consumes next bytes as long as they meet condition.
    /// At the end, the next byte fails condition.
    pub fn take_while<F>(&mut self, condition: F)
    where
        F: Fn(u8) -> bool,
    {
        while let Some(byte) = self.peek() {
            if !condition(byte) {
                break;
            }
            self.take();
        }
    }

    /// Consumes next bytes as long as they do not meet condition.
    /// At the end, the next byte meets condition.
    pub fn take_until<F>(&mut self, condition: F)
    where
        F: Fn(u8) -> bool,
    {
        self.take_while(|byte| !condition(byte));
    }

    /// Text of the bytes in `start..end`, one char per byte.
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.source[start..end].iter().map(|&b| char::from(b)).collect()
    }
}
