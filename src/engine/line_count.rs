//! Line counting engine
//!
//! Counts `\n` terminators in each file of a worker's slice. Reading is done
//! on raw bytes through a buffered reader, so encoding never matters.
//!
//! A file that is missing, unreadable, or fails mid-read counts as zero lines
//! for that path. One bad file never aborts the worker or the round. Each file
//! is opened, read, and closed before the next path is touched.

use super::FileCounts;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// Read buffer size for line counting
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Count lines in every path of `paths`
///
/// Returns one entry per distinct path. A path listed twice in the same slice
/// has its counts added, the same policy the merge step applies across workers.
pub fn count_lines_local(paths: &[String]) -> FileCounts {
    let mut counts = FileCounts::new();

    for path in paths {
        let lines = match count_lines_in_file(Path::new(path)) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path, "file not found, counting zero lines");
                0
            }
            Err(e) => {
                warn!(path = %path, error = %e, "unreadable file, counting zero lines");
                0
            }
        };
        *counts.entry(path.clone()).or_insert(0) += lines;
    }

    counts
}

/// Count `\n` bytes in the file at `path`
///
/// The file handle is dropped before returning on every path, including errors.
pub fn count_lines_in_file(path: &Path) -> io::Result<u64> {
    let file = File::open(path)?;
    let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);
    let mut lines = 0u64;

    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        lines += buf.iter().filter(|&&b| b == b'\n').count() as u64;
        let consumed = buf.len();
        reader.consume(consumed);
    }

    Ok(lines)
}
