//! Content digests for dataset identity.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Buffer size for reading files during hashing.
const BUFFER_SIZE: usize = 65536; // 64 KB

/// Computes the lowercase hex SHA-256 digest of a file.
pub fn file_sha256(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    let mut reader = BufReader::with_capacity(BUFFER_SIZE, file);

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| IngestError::io(path, e))?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let digest = hex::encode(hasher.finalize());
    debug!(path = %path.display(), sha256 = %digest, "hashed file");
    Ok(digest)
}
