//! File hashing utilities

use md5::{Digest, Md5};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::engine::unit::UnitError;
use crate::utils::config::HashingConsts;

/// MD5 a file's full contents and return the lowercase hex digest.
/// Reads in fixed-size chunks; a file that shrinks or fails mid-read becomes a
/// [`UnitError::Read`] for that file only. A file that vanished before the open is
/// reported as [`UnitError::NotExist`].
pub fn hash_file(path: &Path) -> Result<String, UnitError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => UnitError::NotExist,
        _ => UnitError::Open(e),
    })?;
    let mut hasher = Md5::new();
    let mut reader = std::io::BufReader::with_capacity(HashingConsts::HASH_READ_CHUNK_SIZE, file);
    let mut buffer = vec![0u8; HashingConsts::HASH_READ_CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(UnitError::Read(e)),
        };
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// MD5 of an in-memory buffer, hex encoded.
pub fn hash_bytes(data: &[u8]) -> String {
    format!("{:x}", Md5::digest(data))
}

/// True if `s` has the shape of a hex MD5 digest (32 hex digits, either case).
pub fn is_hex_digest(s: &str) -> bool {
    s.len() == HashingConsts::DIGEST_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Compare two hex digests, ignoring case.
pub fn digest_equals(computed: &str, expected: &str) -> bool {
    computed.eq_ignore_ascii_case(expected.trim())
}
