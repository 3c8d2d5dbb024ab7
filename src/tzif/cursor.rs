use crate::errors::TzError;

/// Which [`TzError`] variant a [`Cursor`]'s own EOF/mismatch errors should
/// use, since the same scanner reads both TZif bytes and POSIX TZ strings.
#[derive(Clone, Copy)]
enum ErrorKind {
    Tzif,
    PosixTz,
}

impl ErrorKind {
    fn make(self, msg: &'static str) -> TzError {
        match self {
            ErrorKind::Tzif => TzError::InvalidTzif(msg),
            ErrorKind::PosixTz => TzError::InvalidPosixTz(msg),
        }
    }
}

/// Helper to read data from a byte slice without copying.
pub(crate) struct Cursor<'a> {
    remaining: &'a [u8],
    error_kind: ErrorKind,
}

impl<'a> Cursor<'a> {
    /// Builds a cursor over TZif binary data; its own errors report as
    /// [`TzError::InvalidTzif`].
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { remaining: bytes, error_kind: ErrorKind::Tzif }
    }

    /// Builds a cursor over a POSIX TZ string; its own errors report as
    /// [`TzError::InvalidPosixTz`].
    pub(crate) fn new_posix_tz(bytes: &'a [u8]) -> Self {
        Self { remaining: bytes, error_kind: ErrorKind::PosixTz }
    }

    pub(crate) fn read_exact(&mut self, len: usize) -> Result<&'a [u8], TzError> {
        if self.remaining.len() < len {
            return Err(self.error_kind.make("unexpected end of data"));
        }
        let (data, remaining) = self.remaining.split_at(len);
        self.remaining = remaining;
        Ok(data)
    }

    pub(crate) fn read_until(&mut self, byte: u8) -> &'a [u8] {
        let index = self.remaining.iter().position(|&b| b == byte).unwrap_or(self.remaining.len());
        let (data, remaining) = self.remaining.split_at(index);
        self.remaining = remaining;
        data
    }

    pub(crate) fn read_while(&mut self, pred: impl Fn(&u8) -> bool) -> &'a [u8] {
        let index = self.remaining.iter().position(|b| !pred(b)).unwrap_or(self.remaining.len());
        let (data, remaining) = self.remaining.split_at(index);
        self.remaining = remaining;
        data
    }

    pub(crate) fn read_tag(&mut self, bytes: &[u8]) -> Result<&'a [u8], TzError> {
        if self.remaining.len() < bytes.len() {
            return Err(self.error_kind.make("unexpected end of data"));
        }
        let (data, remaining) = self.remaining.split_at(bytes.len());
        if data != bytes {
            return Err(self.error_kind.make("unexpected bytes"));
        }
        self.remaining = remaining;
        Ok(data)
    }

    pub(crate) fn remaining(&self) -> &'a [u8] {
        self.remaining
    }

    pub(crate) fn empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub(crate) fn get_next(&self) -> Result<u8, TzError> {
        self.remaining
            .first()
            .copied()
            .ok_or_else(|| self.error_kind.make("unexpected end of data"))
    }
}
