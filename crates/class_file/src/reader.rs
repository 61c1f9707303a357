use std::io::{Cursor, Read};

use byteorder::{BigEndian, ReadBytesExt};

use crate::{ClassFileError, Result};

type Endian = BigEndian;

/// Positional big-endian reader over an in-memory buffer. The class file
/// format is strictly sequential, so the only failure mode is running out
/// of bytes mid-read.
pub struct ByteReader<'a> {
    r: Cursor<&'a [u8]>,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { r: Cursor::new(buf) }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.r.read_u8().map_err(eof)
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        self.r.read_u16::<Endian>().map_err(eof)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.r.read_u32::<Endian>().map_err(eof)
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        self.r.read_u64::<Endian>().map_err(eof)
    }

    pub fn read_u16_table(&mut self, count: u16) -> Result<Vec<u16>> {
        let mut table = vec![0u16; count as usize];
        self.r.read_u16_into::<Endian>(&mut table).map_err(eof)?;
        Ok(table)
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        if n > self.remaining() {
            return Err(ClassFileError::UnexpectedEndOfInput);
        }

        let mut bytes = vec![0u8; n];
        self.r.read_exact(&mut bytes).map_err(eof)?;
        Ok(bytes)
    }

    fn remaining(&self) -> usize {
        let buf = self.r.get_ref();
        buf.len().saturating_sub(self.r.position() as usize)
    }
}

fn eof(_: std::io::Error) -> ClassFileError {
    ClassFileError::UnexpectedEndOfInput
}

#[cfg(test)]
mod read_tests {
    use super::*;

    #[test]
    fn it_should_read_fixed_width_integers_big_endian() {
        let mut r = ByteReader::new(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07]);

        assert_eq!(r.read_u8().unwrap(), 0x01);
        assert_eq!(r.read_u16().unwrap(), 0x0203);
        assert_eq!(r.read_u32().unwrap(), 0x04050607);
    }

    #[test]
    fn it_should_read_u64_big_endian() {
        let mut r = ByteReader::new(&[0xca, 0xfe, 0xba, 0xbe, 0x00, 0x00, 0x00, 0x34]);

        assert_eq!(r.read_u64().unwrap(), 0xcafebabe00000034);
    }

    #[test]
    fn it_should_fail_once_the_buffer_is_exhausted() {
        let mut r = ByteReader::new(&[0x01]);

        assert_eq!(r.read_u16(), Err(ClassFileError::UnexpectedEndOfInput));
    }

    #[test]
    fn it_should_read_bounded_byte_slices() {
        let mut r = ByteReader::new(&[0x01, 0x02, 0x03]);

        assert_eq!(r.read_bytes(2).unwrap(), vec![0x01, 0x02]);
        assert_eq!(r.read_bytes(2), Err(ClassFileError::UnexpectedEndOfInput));
    }

    #[test]
    fn it_should_fail_on_oversized_byte_requests_without_reading() {
        let mut r = ByteReader::new(&[0x01, 0x02]);

        assert_eq!(
            r.read_bytes(usize::MAX),
            Err(ClassFileError::UnexpectedEndOfInput)
        );
        assert_eq!(r.read_u16().unwrap(), 0x0102);
    }
}
