// ── Central error type ────────────────────────────────────────────────────────
//
// Every fallible windowing call returns `error::Result<T>`.  Nothing here
// panics; failures surface once as a modal dialog (see `app::report_fatal`)
// and once in the log.

/// Every error the window demo can produce.
///
/// The `Display` text of the first three variants is exactly what the user
/// sees in the failure dialog; the OS error code only goes to the log.
#[derive(Debug, thiserror::Error)]
pub(crate) enum WindowError {
    /// The window class could not be registered.
    #[error("RegisterClass FAILED")]
    RegisterClass {
        /// `GetLastError()` value; every variant uses the same convention.
        code: u32,
    },

    /// The main window could not be created.
    #[error("CreateWindow FAILED")]
    CreateWindow { code: u32 },

    /// The host reported an internal error instead of a message or quit.
    #[error("GetMessage FAILED")]
    GetMessage { code: u32 },

    /// Any other Win32 call that failed (module lookup, window destruction).
    #[error("{function} failed (error {code:#010x})")]
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        code: u32,
    },
}

impl WindowError {
    /// Caption for the failure dialog.
    ///
    /// `None` lets the system pick its default caption ("Error"), which is
    /// what the registration and creation failures have always used.
    pub(crate) fn caption(&self) -> Option<&'static str> {
        match self {
            Self::GetMessage { .. } => Some("Error"),
            Self::RegisterClass { .. } | Self::CreateWindow { .. } | Self::Win32 { .. } => None,
        }
    }

    /// The raw OS error code carried by every variant.
    pub(crate) fn os_code(&self) -> u32 {
        match self {
            Self::RegisterClass { code }
            | Self::CreateWindow { code }
            | Self::GetMessage { code }
            | Self::Win32 { code, .. } => *code,
        }
    }
}

/// Recover the Win32 error code from an HRESULT.
///
/// `HRESULT_FROM_WIN32` values (`0x8007xxxx`) yield the `GetLastError` code
/// in their low word; any other HRESULT is kept as its raw bits.
pub(crate) fn win32_code(hresult: i32) -> u32 {
    let bits = hresult as u32;
    if bits & 0xFFFF_0000 == 0x8007_0000 {
        bits & 0xFFFF
    } else {
        bits
    }
}

/// Convenience alias used throughout the crate.
pub(crate) type Result<T> = std::result::Result<T, WindowError>;

// ── Tests ─────────────────────────────────────────────────────────────────────
