//! `sb-tree`: the genealogy produced by the seedbank simulator.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`node`]      | `LineageNode`, `StateChange`                                |
//! | [`tree`]      | `SeedbankTree` arena, mutation API, `validate`              |
//! | [`stats`]     | `TreeStats` (TMRCA, per-state branch length, change counts) |
//! | [`newick`]    | `to_newick`, `to_collapsed_newick`                          |
//! | [`parse`]     | `from_newick`                                               |
//! | [`error`]     | `TreeError`, `TreeResult<T>`                                |
//!
//! # Arena layout
//!
//! Nodes live in one `Vec<LineageNode>` and refer to each other by
//! [`NodeId`](sb_core::NodeId).  A node stores its parent and its (zero or
//! two) children as IDs, so there is no ownership cycle and a finished tree
//! can be cloned, compared and sent between threads like plain data.
//!
//! A node represents the whole lineage segment from its own height up to its
//! parent's height.  Migrations do not create nodes; they are appended to the
//! segment's `changes` list while the lineage is live.

pub mod error;
pub mod newick;
pub mod node;
pub mod parse;
pub mod stats;
pub mod tree;


pub use error::{TreeError, TreeResult};
pub use newick::{subtree_to_newick, to_collapsed_newick, to_newick};
pub use node::{LineageNode, StateChange};
pub use parse::from_newick;
pub use stats::TreeStats;
pub use tree::SeedbankTree;
