//! Decompressing line source over the dump archive.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use bzip2::read::BzDecoder;

use super::types::ExtractError;

/// Buffer capacity over the decompressed stream.
const READ_BUFFER_BYTES: usize = 1024 * 1024;

/// Lazy, forward-only iterator over the decoded text lines of a bzip2 archive.
///
/// The decompression stream is owned by the iterator and released when it is dropped,
/// including on early termination through the page cap. The iterator is not restartable;
/// open a fresh one per pass.
pub struct DumpLines {
    lines: Lines<BufReader<BzDecoder<File>>>,
}

impl std::fmt::Debug for DumpLines {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DumpLines").finish_non_exhaustive()
    }
}

impl DumpLines {
    /// Open the archive at `path`.
    ///
    /// Fails with [`ExtractError::Io`] when the file cannot be opened; corruption inside
    /// the compressed stream only surfaces later, from [`Iterator::next`].
    pub fn open(path: &Path) -> Result<Self, ExtractError> {
        let file = File::open(path)?;
        let decoder = BzDecoder::new(file);
        let reader = BufReader::with_capacity(READ_BUFFER_BYTES, decoder);
        Ok(Self {
            lines: reader.lines(),
        })
    }
}

impl Iterator for DumpLines {
    type Item = Result<String, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines
            .next()
            .map(|result| result.map_err(classify_read_error))
    }
}

/// Classify a read-side failure.
///
/// The bzip2 reader reports corrupt blocks as `InvalidInput` and `lines` reports bytes
/// that are not valid UTF-8 as `InvalidData`; a stream truncated mid-block surfaces as
/// `UnexpectedEof`. All three mean the remaining stream cannot be trusted.
fn classify_read_error(err: std::io::Error) -> ExtractError {
    use std::io::ErrorKind;

    match err.kind() {
        ErrorKind::InvalidInput | ErrorKind::InvalidData | ErrorKind::UnexpectedEof => {
            ExtractError::Decode(err)
        }
        _ => ExtractError::Io(err),
    }
}
