//! Linux system interface.
//!
//! Host facts shown in reports, plus the privilege probe run at startup.
//! Missing data falls back to `None` or "unknown"; nothing here panics.

use crate::HarnessError;
use std::fs;

/// Get the system hostname
pub fn get_hostname() -> Result<String, HarnessError> {
    for path in ["/etc/hostname", "/proc/sys/kernel/hostname"] {
        if let Ok(hostname) = fs::read_to_string(path) {
            let hostname = hostname.trim();
            if !hostname.is_empty() {
                return Ok(hostname.to_string());
            }
        }
    }

    Err(HarnessError::Io {
        context: "get_hostname".to_string(),
        message: "Could not read hostname from /etc/hostname or /proc".to_string(),
    })
}

/// Running kernel release, the version modules are built against.
pub fn get_kernel_release() -> Result<String, HarnessError> {
    fs::read_to_string("/proc/sys/kernel/osrelease")
        .map(|s| s.trim().to_string())
        .map_err(|e| HarnessError::Io {
            context: "get_kernel_release".to_string(),
            message: e.to_string(),
        })
}

/// Whether the process runs with an effective UID of 0.
pub fn is_root() -> bool {
    // SAFETY: geteuid(2) has no preconditions and cannot fail.
    unsafe { libc::geteuid() == 0 }
}

/// Get current Unix timestamp
pub fn get_unix_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
