//! Random-access little-endian byte source over a single DCIMG file.

use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
    path::Path,
};

use binrw::BinReaderExt;

use crate::errors::DcimgError;

/// Random-access little-endian reader over a single file.
///
/// Every multi-byte read advances the cursor by the field width and is
/// little-endian, per the DCIMG wire format. `readU32le`/`readI32le` widen
/// their result to the host's 64-bit domain so that offset arithmetic
/// further up the stack (`headerSize + dataOffset`, frame bases, ...)
/// cannot silently truncate.
#[derive(Debug)]
pub(crate) struct DcimgReader {
    pub(crate) len: u64,
    inner: BufReader<File>,
}

impl DcimgReader {
    pub(crate) fn open(path: &Path) -> Result<Self, DcimgError> {
        let file = File::open(path)?;
        let len = file.metadata()?.len();
        Ok(Self {
            inner: BufReader::new(file),
            len,
        })
    }

    pub(crate) fn seek(&mut self, abs: u64) -> Result<u64, DcimgError> {
        Ok(self.inner.seek(SeekFrom::Start(abs))?)
    }

    pub(crate) fn skip(&mut self, n: i64) -> Result<u64, DcimgError> {
        Ok(self.inner.seek(SeekFrom::Current(n))?)
    }

    pub(crate) fn tell(&mut self) -> Result<u64, DcimgError> {
        Ok(self.inner.stream_position()?)
    }

    pub(crate) fn read_u32le(&mut self) -> Result<u64, DcimgError> {
        Ok(self.inner.read_le::<u32>()? as u64)
    }

    pub(crate) fn read_i32le(&mut self) -> Result<i64, DcimgError> {
        Ok(self.inner.read_le::<i32>()? as i64)
    }

    pub(crate) fn read_u64le(&mut self) -> Result<u64, DcimgError> {
        Ok(self.inner.read_le::<u64>()?)
    }

    pub(crate) fn read_i64le(&mut self) -> Result<i64, DcimgError> {
        Ok(self.inner.read_le::<i64>()?)
    }

    pub(crate) fn read_string(&mut self, n: usize) -> Result<String, DcimgError> {
        let mut buf = vec![0_u8; n];
        self.inner.read_exact(&mut buf)?;
        Ok(buf.iter().map(|b| *b as char).collect())
    }

    /// Reads exactly `n` bytes into `buf[off..off + n]`.
    pub(crate) fn read_into(&mut self, buf: &mut [u8], off: usize, n: usize) -> Result<(), DcimgError> {
        self.inner.read_exact(&mut buf[off..off + n])?;
        Ok(())
    }

    pub(crate) fn close(self) {
        // BufReader<File> releases the descriptor on drop.
    }
}

impl Read for DcimgReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Seek for DcimgReader {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.inner.seek(pos)
    }
}

/// Reads five bytes from the stream's current position and reports whether
/// they equal the DCIMG magic. Does not rewind on mismatch.
pub fn is_dcimg<R: Read + Seek>(stream: &mut R) -> Result<bool, DcimgError> {
    let mut buf = [0_u8; 5];
    match stream.read_exact(&mut buf) {
        Ok(()) => Ok(&buf == crate::consts::MAGIC),
        Err(err) if err.kind() == std::io::ErrorKind::UnexpectedEof => Ok(false),
        Err(err) => Err(err.into()),
    }
}
