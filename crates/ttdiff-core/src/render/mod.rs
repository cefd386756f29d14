//! Text renderers over parsed snapshots and diffs

pub mod dump;
pub mod pane;

pub use dump::{render_class_enum, render_type_tree};
pub use pane::{pane_rows, render_side_by_side, PaneRow};
