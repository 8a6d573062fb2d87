//! # Taskdeck CLI
//!
//! A single-user, in-memory todo application driven by a numbered menu over
//! stdin/stdout. Entirely independent of the API server: no persistence, no
//! authentication, no shared types. Process termination discards all state —
//! intentional, user-facing behavior.
//!
//! ## Modules
//!
//! - `store`: In-memory task store with sequential, never-reused ids
//! - `menu`: The interactive menu loop

pub mod menu;
pub mod store;
