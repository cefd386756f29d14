//! Diff sessions: two loaded snapshots and their diff.

use std::path::Path;

use ttdiff_core::render::{pane_rows, PaneRow};
use ttdiff_core::{diff_snapshots, DiffStatus, Side, Snapshot, SnapshotDiff, TreeDiff};
use ttdiff_core::{log_op_end, log_op_error, log_op_start};

use crate::commands::load::load_snapshot;
use crate::config::EngineConfig;
use crate::errors::{class_not_found, from_dump, Result};

/// A loaded pair of snapshots and the diff between them
#[derive(Debug, Clone)]
pub struct DiffSession {
    left: Snapshot,
    right: Snapshot,
    diff: SnapshotDiff,
}

impl DiffSession {
    /// Load both dumps and diff them
    ///
    /// ## Errors
    ///
    /// Any error of [`load_snapshot`] for either side, or of
    /// [`DiffSession::from_snapshots`].
    pub fn open(
        left_path: impl AsRef<Path>,
        right_path: impl AsRef<Path>,
        config: &EngineConfig,
    ) -> Result<Self> {
        let left = load_snapshot(left_path, config)?;
        let right = load_snapshot(right_path, config)?;
        Self::from_snapshots(left, right, config)
    }

    /// Diff two already loaded snapshots
    ///
    /// ## Errors
    ///
    /// - `ConsistencyViolation`: strict version order is on and the left
    ///   snapshot is not older, or the differ met mismatched identities
    pub fn from_snapshots(left: Snapshot, right: Snapshot, config: &EngineConfig) -> Result<Self> {
        let op = "diff_snapshots";
        log_op_start!(
            op,
            left_version = %left.version,
            right_version = %right.version
        );
        let start = std::time::Instant::now();

        let diff = diff_snapshots(&left, &right, &config.diff_options())
            .map_err(|e| from_dump(op, e))
            .map_err(|e| {
                log_op_error!(op, e.clone(), duration_ms = start.elapsed().as_millis() as u64);
                e
            })?;

        log_op_end!(
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            tree_diff_count = diff.tree_diffs.len()
        );
        Ok(Self { left, right, diff })
    }

    pub fn left(&self) -> &Snapshot {
        &self.left
    }

    pub fn right(&self) -> &Snapshot {
        &self.right
    }

    pub fn diff(&self) -> &SnapshotDiff {
        &self.diff
    }

    /// Class diffs whose status is one of `statuses`, in diff order
    pub fn filter(&self, statuses: &[DiffStatus]) -> Vec<&TreeDiff> {
        self.diff
            .tree_diffs
            .iter()
            .filter(|t| statuses.contains(&t.status))
            .collect()
    }

    /// Look up the diff of one class
    ///
    /// ## Errors
    ///
    /// - `InvalidInput`: the class id is in neither snapshot
    pub fn class_diff(&self, class_id: i32) -> Result<&TreeDiff> {
        let op = "class_diff";
        log_op_start!(op, class_id = class_id);
        let start = std::time::Instant::now();

        let tree = self.diff.find(class_id).ok_or_else(|| {
            let err = class_not_found(class_id);
            log_op_error!(op, err.clone(), duration_ms = start.elapsed().as_millis() as u64);
            err
        })?;

        log_op_end!(
            op,
            duration_ms = start.elapsed().as_millis() as u64,
            class_id = class_id,
            status = tree.status.label()
        );
        Ok(tree)
    }

    /// Left and right pane rows of one class
    ///
    /// ## Errors
    ///
    /// As [`DiffSession::class_diff`].
    pub fn panes(&self, class_id: i32) -> Result<(Vec<PaneRow>, Vec<PaneRow>)> {
        let tree = self.class_diff(class_id)?;
        Ok((pane_rows(tree, Side::Left), pane_rows(tree, Side::Right)))
    }
}
