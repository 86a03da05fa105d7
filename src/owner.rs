/*
 * Owner-window resolution for dialog parenting.
 *
 * The bridge keeps at most one weak reference to a top-level window of the
 * current process and hands it to every dialog-producing call so the dialog
 * is modally parented. The reference is only ever looked up and remembered;
 * the bridge never creates or destroys the window.
 *
 * OS access goes through the `WindowProbe` trait so the four-mode update
 * protocol can be exercised with a mock (the same seam pattern the rest of
 * this codebase uses for filesystem and config access). The Win32 probe
 * enumerates top-level windows and short-circuits at the first one owned by
 * the current process.
 */

use std::str::FromStr;

use crate::error::BridgeError;

/// Raw window handle value, wide enough for an HWND on any Windows target.
pub type RawWindowHandle = isize;

/*
 * How `set_owner_mode` should update the remembered owner window.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerMode {
    /// Drop the owner reference.
    None,
    /// Keep the owner only if it still identifies a live window.
    Check,
    /// Unconditionally re-resolve from the process's top-level windows.
    Process,
    /// Re-resolve only when the current owner is absent or dead.
    ProcessCheck,
}

impl FromStr for OwnerMode {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(OwnerMode::None),
            "check" => Ok(OwnerMode::Check),
            "process" => Ok(OwnerMode::Process),
            "process-check" => Ok(OwnerMode::ProcessCheck),
            other => Err(BridgeError::InvalidArgument(format!(
                "unknown owner mode '{other}' (expected one of: none, check, process, process-check)"
            ))),
        }
    }
}

/*
 * The two OS questions owner resolution needs: is a remembered handle still
 * a live window, and which top-level window (if any) belongs to the current
 * process. Implementations must answer the second with the *first* match in
 * enumeration order; only one candidate is ever needed.
 */
pub trait WindowProbe {
    fn is_live(&self, handle: RawWindowHandle) -> bool;
    fn find_current_process_window(&self) -> Option<RawWindowHandle>;
}

/*
 * Holds the process-wide owner reference and applies `OwnerMode` updates.
 * Owned by `BridgeContext`; not self-synchronizing (see the crate docs on
 * the single-threaded host assumption).
 */
pub struct OwnerResolver {
    owner: Option<RawWindowHandle>,
    probe: Box<dyn WindowProbe>,
}

impl OwnerResolver {
    pub fn new(probe: Box<dyn WindowProbe>) -> Self {
        OwnerResolver { owner: None, probe }
    }

    /// The currently remembered owner, if any. No liveness check is made;
    /// use `apply(OwnerMode::Check)` to invalidate a dead reference.
    pub fn current(&self) -> Option<RawWindowHandle> {
        self.owner
    }

    /*
     * Applies one owner-mode update and reports whether an owner is set
     * afterwards. `ProcessCheck` is the idempotent fast path: a live owner
     * is kept without touching the window enumeration.
     */
    pub fn apply(&mut self, mode: OwnerMode) -> bool {
        match mode {
            OwnerMode::None => {
                self.owner = None;
            }
            OwnerMode::Check => {
                if let Some(handle) = self.owner {
                    if !self.probe.is_live(handle) {
                        log::debug!("OwnerResolver: owner {handle:#x} is gone, clearing");
                        self.owner = None;
                    }
                }
            }
            OwnerMode::Process => {
                self.owner = self.probe.find_current_process_window();
            }
            OwnerMode::ProcessCheck => {
                let alive = self.owner.is_some_and(|handle| self.probe.is_live(handle));
                if !alive {
                    self.owner = self.probe.find_current_process_window();
                }
            }
        }
        log::trace!("OwnerResolver: owner after {mode:?} is {:?}", self.owner);
        self.owner.is_some()
    }
}

/*
 * A probe that sees no windows at all. Used as the context default on
 * targets without a Win32 window table, and handy as a baseline in tests.
 */
pub struct NullWindowProbe;

impl WindowProbe for NullWindowProbe {
    fn is_live(&self, _handle: RawWindowHandle) -> bool {
        false
    }

    fn find_current_process_window(&self) -> Option<RawWindowHandle> {
        None
    }
}

#[cfg(windows)]
pub use win32_probe::Win32WindowProbe;

#[cfg(windows)]
mod win32_probe {
    use super::{RawWindowHandle, WindowProbe};

    use windows::Win32::Foundation::{FALSE, HWND, LPARAM, TRUE};
    use windows::Win32::System::Threading::GetCurrentProcessId;
    use windows::Win32::UI::WindowsAndMessaging::{
        EnumWindows, GetWindowThreadProcessId, IsWindow,
    };
    use windows::core::BOOL;

    /// Probe backed by `IsWindow` and `EnumWindows`.
    pub struct Win32WindowProbe;

    struct EnumData {
        process_id: u32,
        found: RawWindowHandle,
    }

    /*
     * `EnumWindows` callback: records the first top-level window owned by
     * the target process and stops the enumeration by returning FALSE.
     */
    unsafe extern "system" fn enum_proc(hwnd: HWND, lparam: LPARAM) -> BOOL {
        let data = unsafe { &mut *(lparam.0 as *mut EnumData) };
        let mut process_id = 0u32;
        unsafe { GetWindowThreadProcessId(hwnd, Some(&mut process_id)) };
        if process_id == data.process_id {
            data.found = hwnd.0 as RawWindowHandle;
            return FALSE;
        }
        TRUE
    }

    impl WindowProbe for Win32WindowProbe {
        fn is_live(&self, handle: RawWindowHandle) -> bool {
            unsafe { IsWindow(Some(HWND(handle as *mut core::ffi::c_void))) }.as_bool()
        }

        fn find_current_process_window(&self) -> Option<RawWindowHandle> {
            let mut data = EnumData {
                process_id: unsafe { GetCurrentProcessId() },
                found: 0,
            };
            // EnumWindows reports failure when the callback stops it early,
            // so found-ness is judged by the captured handle, not the call
            // result.
            let _ = unsafe {
                EnumWindows(
                    Some(enum_proc),
                    LPARAM(&mut data as *mut EnumData as isize),
                )
            };
            if data.found != 0 { Some(data.found) } else { None }
        }
    }
}
