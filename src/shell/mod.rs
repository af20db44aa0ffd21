//! Shell integration helpers.
//!
//! The binary communicates with the calling shell through **stdout**.
//! All TUI rendering goes to the alternate screen (stderr-backed), so stdout
//! is reserved for the "result" — the edit route the user navigated to, if
//! any, which the wrapper function resolves against the admin base URL.

pub mod integration;
