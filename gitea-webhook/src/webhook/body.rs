//! Request body handling.

use std::io::{self, Read};

/// Owns a request body and drains it when dropped.
///
/// Whatever the pipeline did with the body, the remaining bytes are read into
/// a sink before the reader is released, so a pooled connection can carry the
/// next request. Drain errors are ignored.
pub(crate) struct DrainOnDrop<R: Read> {
    reader: R,
}

impl<R: Read> DrainOnDrop<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read the rest of the body into memory.
    pub(crate) fn read_all(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.reader.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl<R: Read> Drop for DrainOnDrop<R> {
    fn drop(&mut self) {
        let _ = io::copy(&mut self.reader, &mut io::sink());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// A reader that records how much was read and whether it was dropped.
    pub(crate) struct TrackedBody {
        data: io::Cursor<Vec<u8>>,
        fail: bool,
        pub(crate) consumed: Rc<Cell<usize>>,
        pub(crate) released: Rc<Cell<bool>>,
    }

    impl TrackedBody {
        pub(crate) fn new(data: &[u8]) -> Self {
            Self {
                data: io::Cursor::new(data.to_vec()),
                fail: false,
                consumed: Rc::new(Cell::new(0)),
                released: Rc::new(Cell::new(false)),
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                data: io::Cursor::new(b"unreadable".to_vec()),
                fail: true,
                consumed: Rc::new(Cell::new(0)),
                released: Rc::new(Cell::new(false)),
            }
        }

        pub(crate) fn len(&self) -> usize {
            self.data.get_ref().len()
        }
    }

    impl Read for TrackedBody {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"));
            }
            let n = self.data.read(buf)?;
            self.consumed.set(self.consumed.get() + n);
            Ok(n)
        }
    }

    impl Drop for TrackedBody {
        fn drop(&mut self) {
            self.released.set(true);
        }
    }

    #[test]
    fn test_unread_body_is_drained_on_drop() {
        let body = TrackedBody::new(b"some bytes nobody read");
        let len = body.len();
        let consumed = Rc::clone(&body.consumed);
        let released = Rc::clone(&body.released);

        drop(DrainOnDrop::new(body));

        assert_eq!(consumed.get(), len);
        assert!(released.get());
    }

    #[test]
    fn test_read_all_then_drop() {
        let body = TrackedBody::new(b"{}");
        let released = Rc::clone(&body.released);

        let mut guard = DrainOnDrop::new(body);
        assert_eq!(guard.read_all().unwrap(), b"{}".to_vec());
        drop(guard);

        assert!(released.get());
    }

    #[test]
    fn test_failing_body_is_still_released() {
        let body = TrackedBody::failing();
        let released = Rc::clone(&body.released);

        let mut guard = DrainOnDrop::new(body);
        assert!(guard.read_all().is_err());
        drop(guard);

        assert!(released.get());
    }
}
