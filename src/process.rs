/*
 * Synchronous process lifecycle control for externally identified
 * processes: wait-with-timeout, exit-code retrieval, and forced
 * termination. Every operation opens its own handle for the numeric pid
 * and releases it before returning, on success and failure paths alike;
 * no handle outlives one call.
 *
 * A pid that cannot be opened is an expected, reportable condition (the
 * process may already be gone and reaped), so these functions return the
 * OS's failure sentinels instead of raising: `WAIT_FAILED` from the wait,
 * `false` from terminate, `None` from the exit-code query.
 *
 * The wait-status values are the platform's own numeric conventions and
 * hosts branch on them directly, so they are exported verbatim.
 */

/// The wait ended because the process exited.
pub const WAIT_OBJECT_0: u32 = 0x0000_0000;
/// The wait ended on an abandoned mutex (not produced by process waits,
/// listed for completeness of the host-facing constant set).
pub const WAIT_ABANDONED: u32 = 0x0000_0080;
/// The timeout elapsed before the process exited.
pub const WAIT_TIMEOUT: u32 = 0x0000_0102;
/// The wait could not be performed, e.g. the pid could not be opened.
pub const WAIT_FAILED: u32 = 0xFFFF_FFFF;
/// Exit-code value reported for a process that has not exited yet.
pub const STILL_ACTIVE: u32 = 259;

#[cfg(windows)]
mod native {
    use super::{WAIT_FAILED, WAIT_OBJECT_0};

    use windows::Win32::Foundation::{CloseHandle, HANDLE};
    use windows::Win32::System::Threading::{
        GetExitCodeProcess, INFINITE, OpenProcess, PROCESS_ACCESS_RIGHTS,
        PROCESS_QUERY_LIMITED_INFORMATION, PROCESS_SYNCHRONIZE, PROCESS_TERMINATE,
        TerminateProcess, WaitForSingleObject,
    };

    // Closes the process handle on every exit path.
    struct OwnedProcessHandle(HANDLE);

    impl OwnedProcessHandle {
        fn open(pid: u32, access: PROCESS_ACCESS_RIGHTS) -> Option<Self> {
            match unsafe { OpenProcess(access, false, pid) } {
                Ok(handle) => Some(OwnedProcessHandle(handle)),
                Err(e) => {
                    log::debug!("Process: OpenProcess({pid}) failed: {e}");
                    None
                }
            }
        }
    }

    impl Drop for OwnedProcessHandle {
        fn drop(&mut self) {
            if let Err(e) = unsafe { CloseHandle(self.0) } {
                log::warn!("Process: CloseHandle failed: {e}");
            }
        }
    }

    /*
     * Blocks until the process exits or the timeout elapses, for at most
     * `timeout_ms` milliseconds (`Some(0)` polls without waiting, `None`
     * waits indefinitely). Returns the raw wait status, plus the exit code
     * when it was requested and the wait actually ended in an exit. A pid
     * that cannot be opened yields `WAIT_FAILED` immediately.
     */
    pub fn wait_for_exit(
        pid: u32,
        timeout_ms: Option<u32>,
        want_exit_code: bool,
    ) -> (u32, Option<u32>) {
        let access = PROCESS_QUERY_LIMITED_INFORMATION | PROCESS_SYNCHRONIZE;
        let Some(handle) = OwnedProcessHandle::open(pid, access) else {
            return (WAIT_FAILED, None);
        };

        let status = unsafe { WaitForSingleObject(handle.0, timeout_ms.unwrap_or(INFINITE)) }.0;
        log::trace!("Process: wait on pid {pid} ended with status {status:#x}");

        let exit_code = if want_exit_code && status == WAIT_OBJECT_0 {
            query_exit_code(&handle)
        } else {
            None
        };
        (status, exit_code)
    }

    /// Requests termination of the process with the given exit code and
    /// reports whether the request was accepted.
    pub fn terminate(pid: u32, exit_code: u32) -> bool {
        let Some(handle) = OwnedProcessHandle::open(pid, PROCESS_TERMINATE) else {
            return false;
        };
        match unsafe { TerminateProcess(handle.0, exit_code) } {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Process: TerminateProcess({pid}) failed: {e}");
                false
            }
        }
    }

    /*
     * The process's exit code, `STILL_ACTIVE` (259) while it runs, or
     * `None` when the pid can no longer be opened or queried. The
     * still-active sentinel is passed through verbatim.
     */
    pub fn exit_code(pid: u32) -> Option<u32> {
        let handle = OwnedProcessHandle::open(pid, PROCESS_QUERY_LIMITED_INFORMATION)?;
        query_exit_code(&handle)
    }

    fn query_exit_code(handle: &OwnedProcessHandle) -> Option<u32> {
        let mut code = 0u32;
        match unsafe { GetExitCodeProcess(handle.0, &mut code) } {
            Ok(()) => Some(code),
            Err(e) => {
                log::debug!("Process: GetExitCodeProcess failed: {e}");
                None
            }
        }
    }
}

#[cfg(windows)]
pub use native::{exit_code, terminate, wait_for_exit};

// Without a Win32 process table every pid is an absent process, which the
// contract already has shapes for.
#[cfg(not(windows))]
pub fn wait_for_exit(
    _pid: u32,
    _timeout_ms: Option<u32>,
    _want_exit_code: bool,
) -> (u32, Option<u32>) {
    (WAIT_FAILED, None)
}

#[cfg(not(windows))]
pub fn terminate(_pid: u32, _exit_code: u32) -> bool {
    false
}

#[cfg(not(windows))]
pub fn exit_code(_pid: u32) -> Option<u32> {
    None
}
