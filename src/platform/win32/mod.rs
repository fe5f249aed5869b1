// ── Win32 platform implementation ─────────────────────────────────────────────
//
// The only module in the codebase where `unsafe` code is permitted.  Every
// `unsafe` block MUST carry a `// SAFETY:` comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.

#![allow(unsafe_code)]

use std::rc::Rc;

use crate::{
    app::{self, AppContext},
    host::ShowCommand,
};

pub mod window; // Host implementation, WndProc trampoline, message loop calls

/// Build the Win32 host and run the program on it.  Returns the exit code.
pub(crate) fn run() -> i32 {
    let instance = match window::module_instance() {
        Ok(instance) => instance,
        Err(e) => {
            app::report_fatal(&mut window::Win32Ops, &e);
            return 1;
        }
    };

    let ctx = Rc::new(AppContext::new());
    let mut host = window::Win32Host::new(instance);
    // SW_SHOWDEFAULT: the first ShowWindow call picks up the launcher's
    // STARTUPINFO flag, which is what WinMain would receive as nCmdShow.
    app::run(&mut host, &ctx, ShowCommand::DEFAULT)
}
