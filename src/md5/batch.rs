//! Hashing many inputs, readers and files.
//!
//! Each digest is an independent fold with its own state, so separate inputs
//! can be hashed on separate threads. With the `parallel` feature the batch
//! helpers spread work over rayon's pool; without it they run in order on the
//! calling thread. Results always come back in input order.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::digest::Digest;
use super::hasher::Md5;
use super::md5;
use crate::error::Result;

/// Read granularity for [`md5_reader`].
const READ_CHUNK: usize = 64 * 1024;

/// Digests every input, returning results in the same order.
pub fn md5_batch<T: AsRef<[u8]> + Sync>(inputs: &[T]) -> Vec<Digest> {
    #[cfg(feature = "parallel")]
    {
        inputs.par_iter().map(|input| md5(input.as_ref())).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        inputs.iter().map(|input| md5(input.as_ref())).collect()
    }
}

/// Digests everything `reader` yields until EOF.
pub fn md5_reader<R: Read>(mut reader: R) -> Result<Digest> {
    let mut hasher = Md5::new();
    let mut buf = vec![0u8; READ_CHUNK];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize())
}

/// Digests the contents of the file at `path`.
pub fn md5_file<P: AsRef<Path>>(path: P) -> Result<Digest> {
    let path = path.as_ref();
    debug!("hashing {}", path.display());
    let file = File::open(path)?;
    md5_reader(file)
}

/// Digests several files; one result per path, in order.
pub fn md5_files<P: AsRef<Path> + Sync>(paths: &[P]) -> Vec<Result<Digest>> {
    #[cfg(feature = "parallel")]
    {
        paths.par_iter().map(md5_file).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        paths.iter().map(md5_file).collect()
    }
}
