use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

/// Little-endian field readers for a vox stream.
pub trait VoxReadExt: Read {
    /// Reads a 4 byte chunk tag or magic.
    fn read_tag(&mut self) -> io::Result<[u8; 4]> {
        let mut tag = [0u8; 4];
        self.read_exact(&mut tag)?;
        Ok(tag)
    }

    fn read_i32_le(&mut self) -> io::Result<i32> {
        self.read_i32::<LittleEndian>()
    }

    /// Reads one 4 byte record (a voxel or a palette entry).
    fn read_record(&mut self) -> io::Result<[u8; 4]> {
        self.read_tag()
    }

    /// Reads until `buf` is full or the stream ends. Returns how many bytes were read.
    fn read_up_to(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    /// Discards exactly `count` bytes.
    fn skip_bytes(&mut self, count: u64) -> io::Result<()> {
        let skipped = io::copy(&mut Read::take(&mut *self, count), &mut io::sink())?;
        if skipped < count {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("Expected to skip {} bytes, stream ended after {}", count, skipped),
            ));
        }
        Ok(())
    }
}

impl<R: Read + ?Sized> VoxReadExt for R {}

/// Little-endian field writers for a vox stream.
pub trait VoxWriteExt: Write {
    fn write_tag(&mut self, tag: &[u8; 4]) -> io::Result<()> {
        self.write_all(tag)
    }

    fn write_i32_le(&mut self, value: i32) -> io::Result<()> {
        self.write_i32::<LittleEndian>(value)
    }

    fn write_record(&mut self, record: [u8; 4]) -> io::Result<()> {
        self.write_all(&record)
    }
}

impl<W: Write + ?Sized> VoxWriteExt for W {}
