//! Reading training and test text from disk.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use t9_core::corpus::until_nul;

#[derive(Debug, thiserror::Error)]
pub enum CorpusIoError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Read up to `limit` bytes of `path` (`0` reads the whole file). The text
/// ends at the first zero byte, if any.
pub fn read_text(path: &Path, limit: u64) -> Result<Vec<u8>, CorpusIoError> {
    let display = path.display().to_string();
    let file = File::open(path).map_err(|source| CorpusIoError::Open {
        path: display.clone(),
        source,
    })?;

    let mut buf = Vec::new();
    let read = if limit == 0 {
        (&file).read_to_end(&mut buf)
    } else {
        file.take(limit).read_to_end(&mut buf)
    };
    read.map_err(|source| CorpusIoError::Read {
        path: display,
        source,
    })?;

    let len = until_nul(&buf).len();
    buf.truncate(len);
    Ok(buf)
}
