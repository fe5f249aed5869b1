// ── Win32 host ────────────────────────────────────────────────────────────────
//
// Responsibilities in this file (unsafe confined here):
//   • Implement `Host` / `WindowOps` over the real Win32 API.
//   • Register the window class and create the top-level window.
//   • Attach the `AppContext` to the window via GWLP_USERDATA.
//   • Trampoline every message from `wnd_proc` into `dispatcher::window_proc`.

#![allow(unsafe_code)]

use std::{ffi::c_void, rc::Rc};

use windows::{
    core::PCWSTR,
    Win32::{
        Foundation::{GetLastError, HINSTANCE, HWND, LPARAM, LRESULT, POINT, WPARAM},
        Graphics::Gdi::{GetStockObject, UpdateWindow, HBRUSH, WHITE_BRUSH},
        System::LibraryLoader::GetModuleHandleW,
        UI::WindowsAndMessaging::{
            CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW,
            GetWindowLongPtrW, LoadCursorW, LoadIconW, MessageBoxW, PostQuitMessage,
            RegisterClassExW, SetWindowLongPtrW, ShowWindow, TranslateMessage, CREATESTRUCTW,
            CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT, GWLP_USERDATA, HCURSOR, HICON, HMENU,
            IDC_ARROW, IDI_APPLICATION, MB_OK, MSG, SHOW_WINDOW_CMD, WINDOW_EX_STYLE, WM_NCCREATE,
            WNDCLASSEXW, WNDCLASS_STYLES, WS_OVERLAPPEDWINDOW,
        },
    },
};

use crate::{
    app::AppContext,
    dispatcher,
    error::{win32_code, Result, WindowError},
    event::{Message, WindowHandle},
    host::{Fetch, Host, ShowCommand, WindowOps},
    window::{WindowClass, WindowSpec},
};

// ── Handle conversions ────────────────────────────────────────────────────────

fn to_hwnd(hwnd: WindowHandle) -> HWND {
    HWND(hwnd.0 as *mut c_void)
}

fn from_hwnd(hwnd: HWND) -> WindowHandle {
    WindowHandle(hwnd.0 as isize)
}

fn to_msg(msg: &Message) -> MSG {
    MSG {
        hwnd: to_hwnd(msg.hwnd),
        message: msg.code,
        wParam: WPARAM(msg.wparam),
        lParam: LPARAM(msg.lparam),
        time: msg.time,
        pt: POINT {
            x: msg.point.0,
            y: msg.point.1,
        },
    }
}

fn from_msg(msg: &MSG) -> Message {
    Message {
        hwnd: from_hwnd(msg.hwnd),
        code: msg.message,
        wparam: msg.wParam.0,
        lparam: msg.lParam.0,
        time: msg.time,
        point: (msg.pt.x, msg.pt.y),
    }
}

/// Null-terminated UTF-16 copy of `s`.
fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

// ── Win32Ops ──────────────────────────────────────────────────────────────────

/// The stateless half of the host: everything the window procedure calls.
///
/// Constructed on the fly inside `wnd_proc`, so re-entrant calls never alias
/// a `&mut Win32Host`.
pub(crate) struct Win32Ops;

impl WindowOps for Win32Ops {
    fn default_window_proc(&mut self, msg: &Message) -> isize {
        // SAFETY: the message fields come straight from the procedure
        // arguments Windows handed us for this call.
        unsafe {
            DefWindowProcW(
                to_hwnd(msg.hwnd),
                msg.code,
                WPARAM(msg.wparam),
                LPARAM(msg.lparam),
            )
        }
        .0
    }

    fn destroy_window(&mut self, hwnd: WindowHandle) -> Result<()> {
        // SAFETY: DestroyWindow validates the handle and fails with
        // ERROR_INVALID_WINDOW_HANDLE for stale ones.  It sends WM_DESTROY,
        // which re-enters wnd_proc; the context is only ever borrowed shared.
        unsafe { DestroyWindow(to_hwnd(hwnd)) }.map_err(|e| WindowError::Win32 {
            function: "DestroyWindow",
            code: win32_code(e.code().0),
        })
    }

    fn post_quit_message(&mut self, exit_code: i32) {
        // SAFETY: PostQuitMessage only sets a flag on this thread's queue.
        unsafe { PostQuitMessage(exit_code) };
    }

    fn message_box(&mut self, text: &str, caption: Option<&str>) {
        let text_wide = wide(text);
        let caption_wide = caption.map(wide);
        let caption_ptr = caption_wide
            .as_ref()
            .map_or(PCWSTR::null(), |c| PCWSTR(c.as_ptr()));

        // SAFETY: text_wide and caption_wide are valid null-terminated UTF-16
        // strings that outlive the call; a null caption selects "Error".
        // HWND::default() (null) means the dialog has no owner window.
        // Return value (button pressed) is intentionally unused.
        unsafe {
            let _ = MessageBoxW(
                HWND::default(),
                PCWSTR(text_wide.as_ptr()),
                caption_ptr,
                MB_OK,
            );
        }
    }
}

// ── Win32Host ─────────────────────────────────────────────────────────────────

pub(crate) struct Win32Host {
    instance: HINSTANCE,
    /// Contexts attached to created windows.  Their addresses live in
    /// GWLP_USERDATA, so they must stay allocated while the host lives.
    #[allow(dead_code)] // held for ownership only
    contexts: Vec<Rc<AppContext>>,
}

impl Win32Host {
    pub(crate) fn new(instance: HINSTANCE) -> Self {
        Self {
            instance,
            contexts: Vec::new(),
        }
    }
}

/// The running executable's instance handle.
pub(crate) fn module_instance() -> Result<HINSTANCE> {
    // SAFETY: GetModuleHandleW(None) returns the .exe's own HMODULE, which is
    // valid for the process lifetime.
    let hmodule = unsafe { GetModuleHandleW(None) }.map_err(|e| WindowError::Win32 {
        function: "GetModuleHandleW",
        code: win32_code(e.code().0),
    })?;
    Ok(HINSTANCE(hmodule.0))
}

impl WindowOps for Win32Host {
    fn default_window_proc(&mut self, msg: &Message) -> isize {
        Win32Ops.default_window_proc(msg)
    }

    fn destroy_window(&mut self, hwnd: WindowHandle) -> Result<()> {
        Win32Ops.destroy_window(hwnd)
    }

    fn post_quit_message(&mut self, exit_code: i32) {
        Win32Ops.post_quit_message(exit_code);
    }

    fn message_box(&mut self, text: &str, caption: Option<&str>) {
        Win32Ops.message_box(text, caption);
    }
}

impl Host for Win32Host {
    fn register_class(&mut self, class: &WindowClass) -> Result<()> {
        // SAFETY: IDI_APPLICATION is a built-in icon resource present on all
        // Windows versions.
        let icon: HICON =
            resource_or_null("LoadIconW", unsafe { LoadIconW(None, IDI_APPLICATION) });

        // SAFETY: IDC_ARROW is a built-in cursor resource.
        let cursor: HCURSOR =
            resource_or_null("LoadCursorW", unsafe { LoadCursorW(None, IDC_ARROW) });

        // SAFETY: GetStockObject(WHITE_BRUSH) always returns a valid stock
        // brush; stock objects need no cleanup.
        let background = unsafe { HBRUSH(GetStockObject(WHITE_BRUSH).0) };

        let style = if class.redraw_on_resize {
            CS_HREDRAW | CS_VREDRAW
        } else {
            WNDCLASS_STYLES(0)
        };

        let class_name = wide(class.name);
        let wndclass = WNDCLASSEXW {
            // WNDCLASSEXW is ~80 bytes; the cast to u32 is always lossless.
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style,
            lpfnWndProc: Some(wnd_proc),
            cbClsExtra: 0,
            cbWndExtra: 0,
            hInstance: self.instance,
            hIcon: icon,
            hCursor: cursor,
            hbrBackground: background,
            lpszMenuName: PCWSTR::null(),
            lpszClassName: PCWSTR(class_name.as_ptr()),
            hIconSm: icon,
        };

        // SAFETY: wndclass is fully initialised with valid handles and
        // class_name outlives the call (the system copies the name).
        let atom = unsafe { RegisterClassExW(&wndclass) };
        if atom == 0 {
            return Err(WindowError::RegisterClass { code: last_error() });
        }
        Ok(())
    }

    fn create_window(
        &mut self,
        class: &WindowClass,
        spec: &WindowSpec,
        ctx: &Rc<AppContext>,
    ) -> Result<WindowHandle> {
        let class_name = wide(class.name);
        let title = wide(spec.title);
        let ctx_ptr = Rc::as_ptr(ctx).cast::<c_void>();

        // SAFETY: class_name was registered by `register_class`; both strings
        // outlive the call.  ctx_ptr points into an Rc that `self.contexts`
        // keeps alive below, and is only ever read as `&AppContext`.
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                PCWSTR(class_name.as_ptr()),
                PCWSTR(title.as_ptr()),
                WS_OVERLAPPEDWINDOW,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                CW_USEDEFAULT,
                HWND::default(),
                HMENU::default(),
                self.instance,
                Some(ctx_ptr),
            )
        }
        .map_err(|e| WindowError::CreateWindow {
            code: win32_code(e.code().0),
        })?;

        self.contexts.push(Rc::clone(ctx));
        Ok(from_hwnd(hwnd))
    }

    fn show_window(&mut self, hwnd: WindowHandle, show: ShowCommand) {
        // SAFETY: hwnd was returned by CreateWindowExW.  The return value is
        // the previous visibility state, which we do not need.
        unsafe {
            let _ = ShowWindow(to_hwnd(hwnd), SHOW_WINDOW_CMD(show.0));
        }
    }

    fn update_window(&mut self, hwnd: WindowHandle) {
        // SAFETY: hwnd was returned by CreateWindowExW.  Sends WM_PAINT
        // synchronously if the update region is non-empty.
        unsafe {
            let _ = UpdateWindow(to_hwnd(hwnd));
        }
    }

    fn get_message(&mut self) -> Fetch {
        let mut msg = MSG::default();

        // SAFETY: &mut msg is a valid MSG pointer; a null HWND retrieves
        // messages for all windows on this thread; 0,0 filter accepts all.
        let ret = unsafe { GetMessageW(&mut msg, to_hwnd(WindowHandle::NULL), 0, 0) };

        match ret.0 {
            // GetMessage returns -1 on error.
            -1 => Fetch::Failed(last_error()),
            // Returns 0 when WM_QUIT is retrieved.
            0 => Fetch::Quit(msg.wParam.0 as i32),
            _ => Fetch::Message(from_msg(&msg)),
        }
    }

    fn translate_message(&mut self, msg: &Message) {
        // SAFETY: the MSG is rebuilt from a message GetMessageW just filled.
        // The return value (whether WM_CHAR was posted) is unused.
        unsafe {
            let _ = TranslateMessage(&to_msg(msg));
        }
    }

    fn dispatch_message(&mut self, msg: &Message) -> isize {
        // SAFETY: as above; DispatchMessageW calls wnd_proc synchronously.
        unsafe { DispatchMessageW(&to_msg(msg)) }.0
    }
}

// ── Window procedure ──────────────────────────────────────────────────────────

// SAFETY: wnd_proc is registered as lpfnWndProc in WNDCLASSEXW.
// Windows guarantees that hwnd, msg, wparam, and lparam are valid for the
// lifetime of this call.
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg == WM_NCCREATE {
        // SAFETY: for WM_NCCREATE, lparam points at the CREATESTRUCTW whose
        // lpCreateParams is the context pointer passed to CreateWindowExW.
        let create = &*(lparam.0 as *const CREATESTRUCTW);
        SetWindowLongPtrW(hwnd, GWLP_USERDATA, create.lpCreateParams as isize);
    }

    // SAFETY: GWLP_USERDATA is either 0 (messages such as WM_GETMINMAXINFO
    // that precede WM_NCCREATE) or the Rc<AppContext> address stored above,
    // kept alive by Win32Host::contexts.
    let ctx = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *const AppContext;
    let Some(ctx) = ctx.as_ref() else {
        return DefWindowProcW(hwnd, msg, wparam, lparam);
    };

    let message = Message {
        hwnd: from_hwnd(hwnd),
        code: msg,
        wparam: wparam.0,
        lparam: lparam.0,
        time: 0,
        point: (0, 0),
    };
    LRESULT(dispatcher::window_proc(ctx, &mut Win32Ops, &message))
}

// ── Error helpers ─────────────────────────────────────────────────────────────

/// Unwrap a class resource handle, or fall back to a null handle.
///
/// A class without an icon or cursor still registers; Windows draws the
/// default in its place.
fn resource_or_null<T: Default>(what: &str, loaded: windows::core::Result<T>) -> T {
    loaded.unwrap_or_else(|e| {
        let code = win32_code(e.code().0);
        log::warn!("{what} failed (error {code:#010x}); using a null handle");
        T::default()
    })
}

/// The current Win32 last-error code.
///
/// Call immediately after the failing function: `GetLastError` reads
/// thread-local state that any subsequent API call can overwrite.
fn last_error() -> u32 {
    // SAFETY: GetLastError reads thread-local state and never fails.
    unsafe { GetLastError() }.0
}

// ── Tests ─────────────────────────────────────────────────────────────────────
