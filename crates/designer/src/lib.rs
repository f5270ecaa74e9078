// Library crate: the scoped batch command engine behind every property dialog,
// plus the JSON command protocol used by the CLI and integration tests.

pub mod command;
pub mod error;
pub mod fixtures;
pub mod state;
