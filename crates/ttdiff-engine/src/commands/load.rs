//! Snapshot loading with boundary logging.
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging for `load_snapshot`:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! The core parser and canonicalizer use only `tracing::debug!()`/`trace!()`.

use std::io::Read;
use std::path::Path;

use ttdiff_core::{canonicalize_snapshot, parse_snapshot_bytes, Snapshot};
use ttdiff_core::{log_op_end, log_op_error, log_op_start};

use crate::config::EngineConfig;
use crate::errors::{from_dump, io_error, Result};

const OP: &str = "load_snapshot";

/// Load a dump file into a snapshot
///
/// Canonicalizes the result unless `config.canonicalize` is off.
///
/// ## Errors
///
/// - `Io`: the file cannot be read
/// - `StreamExhausted` / `GrammarViolation` / `ConsistencyViolation`: the dump
///   is truncated, malformed or self-inconsistent
/// - `InvalidInput`: the file is not UTF-8
pub fn load_snapshot(path: impl AsRef<Path>, config: &EngineConfig) -> Result<Snapshot> {
    let path = path.as_ref();
    let path_str = path.display().to_string();
    log_op_start!(OP, path = path_str.as_str());
    let start = std::time::Instant::now();

    let snapshot = std::fs::read(path)
        .map_err(|e| io_error(OP, path, e))
        .and_then(|bytes| build_snapshot(&bytes, config))
        .map_err(|e| {
            log_op_error!(
                OP,
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                path = path_str.as_str()
            );
            e
        })?;

    log_op_end!(
        OP,
        duration_ms = start.elapsed().as_millis() as u64,
        path = path_str.as_str(),
        descriptor_count = snapshot.descriptors().len()
    );
    Ok(snapshot)
}

/// Load a dump from any reader
///
/// ## Errors
///
/// As [`load_snapshot`].
pub fn load_snapshot_from_reader<R: Read>(mut reader: R, config: &EngineConfig) -> Result<Snapshot> {
    log_op_start!(OP, path = "<reader>");
    let start = std::time::Instant::now();

    let mut bytes = Vec::new();
    let snapshot = reader
        .read_to_end(&mut bytes)
        .map_err(|e| io_error(OP, Path::new("<reader>"), e))
        .and_then(|_| build_snapshot(&bytes, config))
        .map_err(|e| {
            log_op_error!(OP, e.clone(), duration_ms = start.elapsed().as_millis() as u64);
            e
        })?;

    log_op_end!(
        OP,
        duration_ms = start.elapsed().as_millis() as u64,
        descriptor_count = snapshot.descriptors().len()
    );
    Ok(snapshot)
}

fn build_snapshot(bytes: &[u8], config: &EngineConfig) -> Result<Snapshot> {
    let raw = parse_snapshot_bytes(bytes).map_err(|e| from_dump(OP, e))?;
    if !config.canonicalize {
        return Ok(raw);
    }
    canonicalize_snapshot(&raw).map_err(|e| from_dump(OP, e))
}
