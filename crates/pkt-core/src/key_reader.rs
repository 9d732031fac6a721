#![forbid(unsafe_code)]

//! Blocking key reader over any byte source.

use std::io::{self, Read};

use crate::event::KeyEvent;
use crate::key_decoder::KeyDecoder;

/// Size of a single raw read.
const READ_CHUNK: usize = 256;

/// Reads bytes from `R` and hands out decoded keys one at a time.
///
/// Bytes of an escape sequence split across reads are kept in the inner
/// [`KeyDecoder`] until the rest arrives.
#[derive(Debug)]
pub struct KeyReader<R> {
    input: R,
    decoder: KeyDecoder,
}

impl<R> KeyReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            decoder: KeyDecoder::new(),
        }
    }

    /// Return a key so the next [`read_key`](Self::read_key) yields it.
    pub fn unread(&mut self, key: KeyEvent) {
        self.decoder.unread(key);
    }

    /// Drop buffered bytes and keys.
    pub fn reset(&mut self) {
        self.decoder.reset();
    }
}

impl<R: Read> KeyReader<R> {
    /// Block until a key is available.
    ///
    /// Returns `Ok(None)` when the input reaches end of file.
    pub fn read_key(&mut self) -> io::Result<Option<KeyEvent>> {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            if let Some(key) = self.decoder.next_key() {
                return Ok(Some(key));
            }
            let count = match self.input.read(&mut chunk) {
                Ok(count) => count,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if count == 0 {
                return Ok(None);
            }
            self.decoder.feed(&chunk[..count]);
        }
    }

    /// Read everything remaining on the input, without decoding.
    pub fn read_all(&mut self) -> io::Result<Vec<u8>> {
        let mut contents = self.decoder.pending_bytes().to_vec();
        self.decoder.reset();
        self.input.read_to_end(&mut contents)?;
        Ok(contents)
    }

    /// Read one cooked-mode line, without its line terminator.
    ///
    /// Returns `Ok(None)` at end of file when no bytes were read.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            match self.input.read(&mut byte) {
                Ok(0) if line.is_empty() => return Ok(None),
                Ok(0) => break,
                Ok(_) if byte[0] == b'\n' => break,
                Ok(_) => line.push(byte[0]),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }

    pub fn get_ref(&self) -> &R {
        &self.input
    }

    pub fn into_inner(self) -> R {
        self.input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{KeyCode, Modifiers};

    /// Hands out its chunks one read at a time.
    struct Chunked(Vec<Vec<u8>>);

    impl Read for Chunked {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.0.is_empty() {
                return Ok(0);
            }
            let chunk = self.0.remove(0);
            buf[..chunk.len()].copy_from_slice(&chunk);
            Ok(chunk.len())
        }
    }

    #[test]
    fn sequence_split_across_reads() {
        let input = Chunked(vec![b"\x1b[1;2".to_vec(), b"A".to_vec()]);
        let mut reader = KeyReader::new(input);
        assert_eq!(
            reader.read_key().unwrap(),
            Some(KeyEvent::new(KeyCode::Up).with_modifiers(Modifiers::SHIFT))
        );
        assert_eq!(reader.read_key().unwrap(), None);
    }

    #[test]
    fn lone_escape_read() {
        let mut reader = KeyReader::new(Chunked(vec![b"\x1b".to_vec(), b"q".to_vec()]));
        assert_eq!(
            reader.read_key().unwrap(),
            Some(KeyEvent::new(KeyCode::Escape))
        );
        assert_eq!(
            reader.read_key().unwrap(),
            Some(KeyEvent::new(KeyCode::Char('q')))
        );
    }

    #[test]
    fn eof_is_none() {
        let mut reader = KeyReader::new(&b""[..]);
        assert_eq!(reader.read_key().unwrap(), None);
    }

    #[test]
    fn read_line_strips_terminators() {
        let mut reader = KeyReader::new(&b"show 3\r\nquit\n"[..]);
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("show 3"));
        assert_eq!(reader.read_line().unwrap().as_deref(), Some("quit"));
        assert_eq!(reader.read_line().unwrap(), None);
    }

    #[test]
    fn read_all_includes_pending_bytes() {
        let mut reader = KeyReader::new(Chunked(vec![b"\x1b[".to_vec()]));
        // The first read leaves "\x1b[" pending and then hits EOF.
        assert_eq!(reader.read_key().unwrap(), None);
        assert_eq!(reader.read_all().unwrap(), b"\x1b[");
    }
}
