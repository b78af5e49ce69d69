//! Performance measurement utilities for memory analysis.
//!
//! Functions target Linux systems and read from /proc/self/status to obtain reliable
//! memory statistics for experimental analysis.

/// Reads the peak resident set size (`VmHWM`) from /proc/self/status on Linux.
///
/// # Returns
/// The peak resident memory in kilobytes (KB), or `None` if the value cannot be read.
#[cfg(target_os = "linux")]
pub fn peak_rss_kb() -> Option<u64> {
    let status_content = std::fs::read_to_string("/proc/self/status").ok()?;
    status_content
        .lines()
        .find_map(|line| line.strip_prefix("VmHWM:"))
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|value| value.parse().ok())
}

/// Peak RSS is only available on Linux; other platforms always report `None`.
#[cfg(not(target_os = "linux"))]
pub fn peak_rss_kb() -> Option<u64> {
    use std::sync::Once;
    static WARN_ONCE: Once = Once::new();
    WARN_ONCE.call_once(|| {
        log::warn!("Peak RSS measurement is only supported on Linux.");
    });
    None
}
