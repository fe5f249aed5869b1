// ── Platform abstraction layer ────────────────────────────────────────────────
//
// Picks the windowing backend for the build target.  No `unsafe` lives here;
// all Win32 FFI is confined to the `win32` sub-module and never leaks outward.

#[cfg(windows)]
pub mod win32;

/// Run the program on the native host and return the process exit code.
#[cfg(windows)]
pub(crate) fn run() -> i32 {
    win32::run()
}

/// There is no native host to drive outside Windows.
#[cfg(not(windows))]
pub(crate) fn run() -> i32 {
    log::error!(
        "{} needs a Win32 host; this platform has none",
        env!("CARGO_PKG_NAME")
    );
    1
}
