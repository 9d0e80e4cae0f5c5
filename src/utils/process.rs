use crate::models::error::WError;
use camino::Utf8Path;
use std::path::Path;
use sysinfo::System;
use tracing::info;

pub struct ProcessChecker;

impl ProcessChecker {
    /// Performs the check. Takes a mutable ref to System to allow
    /// sysinfo to reuse internal buffers for performance.
    pub fn is_running<P: AsRef<Path>>(sys: &mut System, target_paths: &[P]) -> bool {
        sys.refresh_processes();

        sys.processes().values().any(|p| {
            if let Some(exe_path) = p.exe() {
                return target_paths.iter().any(|target| exe_path == target.as_ref());
            }
            false
        })
    }
}

/// Spawns the quick-launch executable detached; refuses when an instance of
/// it is already running.
pub fn launch_detached(exe: &Utf8Path) -> Result<(), WError> {
    if !exe.is_file() {
        return Err(WError::NotFound(format!("executable not found: {exe}")));
    }

    // Canonicalize so the running-process comparison matches sysinfo's view.
    let canonical = dunce::canonicalize(exe.as_std_path())?;
    let mut sys = System::new();
    if ProcessChecker::is_running(&mut sys, &[canonical.as_path()]) {
        return Err(WError::LauncherAlreadyRunning);
    }

    let mut command = std::process::Command::new(&canonical);
    if let Some(parent) = canonical.parent() {
        command.current_dir(parent);
    }
    let child = command.spawn().map_err(|e| {
        WError::ModOperation(format!("failed to spawn {}: {e}", canonical.display()))
    })?;
    info!(pid = child.id(), exe = %exe, "launched quick-launch executable");
    Ok(())
}
