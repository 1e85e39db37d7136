//! Package module for nps.
//!
//! Handles package.json reading, package manager inference, manifest
//! resolution, workspace expansion and bulk manifest discovery.

mod manager;
mod manifest;
mod resolve;
mod scan;
mod types;
mod workspace;

pub use manager::{
    describe_declared_package_manager, has_lock_file, infer_package_manager, infer_package_manager_reason,
    infer_package_manager_within, PackageManager,
};
pub use manifest::{parse_manifest, read_manifest, MANIFEST_FILE};
pub use resolve::{find_manifest_within, resolve_from, resolve_from_within, resolve_root};
pub use scan::{
    discover_manifests, parse_manifests, scan_manifests, FailedPath, ScanReport, ScanStrategy,
    PRUNED_DIR,
};
pub use types::{Manifest, UNKNOWN_NAME};
pub use workspace::{expand_workspaces, WorkspaceEntry, Workspaces};
