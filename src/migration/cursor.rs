//! Sequential byte cursors for layout transforms.
//!
//! Transform functions rewrite one section of the configuration blob into
//! the next version's layout field by field. These cursors pair a buffer
//! slice with a position advanced only through their operations, so the
//! offset arithmetic stays self-documenting and there is no manual pointer
//! bookkeeping to get wrong.
//!
//! All lengths passed in are compile-time constants derived from the
//! migration registry; an overrun is a programming error in a descriptor,
//! not a runtime condition, so these operations carry no error path.

/// Read side: a source section being consumed front to back.
pub struct ReadCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ReadCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current offset from the start of the section.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Consume and return the next `len` bytes.
    pub fn read(&mut self, len: usize) -> &'a [u8] {
        let out = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        out
    }
}

/// Write side: a destination section being populated front to back.
pub struct WriteCursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> WriteCursor<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current offset from the start of the section.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Copy `len` bytes from `src`, advancing both cursors.
    pub fn copy_from(&mut self, src: &mut ReadCursor<'_>, len: usize) {
        self.buf[self.pos..self.pos + len].copy_from_slice(src.read(len));
        self.pos += len;
    }

    /// Write `len` copies of `value`, advancing this cursor.
    pub fn fill(&mut self, value: u8, len: usize) {
        self.buf[self.pos..self.pos + len].fill(value);
        self.pos += len;
    }

    /// Write one byte, advancing this cursor.
    pub fn put_u8(&mut self, value: u8) {
        self.buf[self.pos] = value;
        self.pos += 1;
    }

    /// Write a 16-bit value in native byte order, advancing this cursor.
    pub fn put_u16(&mut self, value: u16) {
        self.buf[self.pos..self.pos + 2].copy_from_slice(&value.to_ne_bytes());
        self.pos += 2;
    }

    /// Mutable view of an already-written region, for in-place fixups
    /// (keycode remapping, per-entry field patches) after a bulk copy.
    pub fn span_mut(&mut self, start: usize, len: usize) -> &mut [u8] {
        &mut self.buf[start..start + len]
    }
}
