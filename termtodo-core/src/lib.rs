//! Shared data model for `termtodo`: tasks, the persisted task-list format,
//! and the weather snapshot.

pub mod codec;
pub mod task;
pub mod weather;
