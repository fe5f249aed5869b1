// ── Window messages ───────────────────────────────────────────────────────────
//
// Platform-neutral view of the Win32 message tuple.  The numeric codes are
// the Win32 values so that `platform::win32` can pass messages through
// untouched; a test in that module pins them to the `windows` crate.

// ── Message codes ─────────────────────────────────────────────────────────────

pub(crate) const WM_DESTROY: u32 = 0x0002;
#[cfg(test)]
pub(crate) const WM_CLOSE: u32 = 0x0010;
#[cfg(test)]
pub(crate) const WM_NCCREATE: u32 = 0x0081;
pub(crate) const WM_KEYDOWN: u32 = 0x0100;
#[cfg(test)]
pub(crate) const WM_CHAR: u32 = 0x0102;
pub(crate) const WM_LBUTTONDOWN: u32 = 0x0201;

// ── Handles ───────────────────────────────────────────────────────────────────

/// Opaque identifier of a host window (the `HWND` bits on Win32).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct WindowHandle(pub(crate) isize);

impl WindowHandle {
    /// The null handle: "no window", or "every window of this thread" when
    /// used as a message filter.
    pub(crate) const NULL: Self = Self(0);
}

/// A virtual-key code: the whole `WPARAM` of `WM_KEYDOWN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct VirtualKey(pub(crate) usize);

impl VirtualKey {
    pub(crate) const ESCAPE: Self = Self(0x1B);
}

// ── Message ───────────────────────────────────────────────────────────────────

/// One queued message, as pulled by the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Message {
    pub(crate) hwnd: WindowHandle,
    pub(crate) code: u32,
    pub(crate) wparam: usize,
    pub(crate) lparam: isize,
    /// Tick count at post time; carried through so translation sees it.
    pub(crate) time: u32,
    /// Cursor position in screen coordinates at post time.
    pub(crate) point: (i32, i32),
}

#[cfg(test)]
impl Message {
    pub(crate) fn new(hwnd: WindowHandle, code: u32, wparam: usize, lparam: isize) -> Self {
        Self {
            hwnd,
            code,
            wparam,
            lparam,
            time: 0,
            point: (0, 0),
        }
    }

    /// Shorthand for a `WM_KEYDOWN` carrying `key`.
    pub(crate) fn key_down(hwnd: WindowHandle, key: VirtualKey) -> Self {
        Self::new(hwnd, WM_KEYDOWN, key.0, 0)
    }
}

impl Message {
    /// Classify this message for the dispatcher.
    pub(crate) fn event(&self) -> Event {
        match self.code {
            WM_LBUTTONDOWN => Event::LeftButtonDown,
            WM_KEYDOWN => Event::KeyDown(VirtualKey(self.wparam)),
            WM_DESTROY => Event::Destroy,
            other => Event::Other(other),
        }
    }
}

/// The handful of messages the dispatcher reacts to; everything else is
/// `Other` and goes to the host's default window procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    LeftButtonDown,
    KeyDown(VirtualKey),
    Destroy,
    Other(u32),
}

// ── Tests ─────────────────────────────────────────────────────────────────────
