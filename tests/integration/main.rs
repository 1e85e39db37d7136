//! Integration tests for nps.
//!
//! Organized by feature:
//!
//! - `fixtures` - Test helpers for creating temporary projects
//! - `cli_tests` - CLI interface tests
//! - `config_tests` - Configuration layering tests
//! - `detection_tests` - Package manager inference tests
//! - `scenario_tests` - The public operations end to end
//! - `snapshot_tests` - Output snapshot tests using insta

mod cli_tests;
mod config_tests;
mod detection_tests;
mod fixtures;
mod scenario_tests;
mod snapshot_tests;
