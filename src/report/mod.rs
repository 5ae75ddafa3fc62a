//! Report renderers for license check results.
//!
//! - [`terminal`] — colored summary box and tables; respects `--verbose` / `--quiet`.
//! - [`json`] — pretty-printed records for other tools to consume.

pub mod json;
pub mod terminal;
