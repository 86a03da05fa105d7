/*
 * One-shot passthrough calls: the thread's last error code, system error
 * message text, the raw command line and its parsed arguments, and the
 * console's output code page. These carry no bridge state beyond the code
 * page used to encode returned text for the host.
 */

use crate::encoding::encode_wide;

use windows::Win32::Foundation::{GetLastError, HLOCAL, MAX_PATH};
use windows::Win32::System::Console::GetConsoleOutputCP;
use windows::Win32::System::Diagnostics::Debug::{
    FORMAT_MESSAGE_FROM_SYSTEM, FORMAT_MESSAGE_IGNORE_INSERTS, FormatMessageW,
};
use windows::Win32::System::Environment::GetCommandLineW;
use windows::Win32::UI::Shell::CommandLineToArgvW;
use windows::core::PWSTR;

/// The calling thread's last Win32 error code.
pub fn last_error() -> u32 {
    unsafe { GetLastError() }.0
}

/// The console's current output code page.
pub fn console_output_code_page() -> u32 {
    unsafe { GetConsoleOutputCP() }
}

/*
 * The system's message text for a Win32 error code (the last error when
 * `error` is omitted), encoded for the host. `None` when the system has no
 * message for the code.
 */
pub fn system_message(error: Option<u32>, code_page: u32) -> Option<Vec<u8>> {
    let error = error.unwrap_or_else(last_error);
    let mut buffer = [0u16; MAX_PATH as usize + 2];
    let len = unsafe {
        FormatMessageW(
            FORMAT_MESSAGE_FROM_SYSTEM | FORMAT_MESSAGE_IGNORE_INSERTS,
            None,
            error,
            0,
            PWSTR(buffer.as_mut_ptr()),
            MAX_PATH,
            None,
        )
    };
    if len == 0 {
        log::debug!("System: no message text for error code {error}");
        return None;
    }
    encode_wide(&buffer[..len as usize], code_page)
}

/// The process's raw command line, encoded for the host.
pub fn command_line(code_page: u32) -> Option<Vec<u8>> {
    let raw = unsafe { GetCommandLineW() };
    if raw.is_null() {
        return None;
    }
    encode_wide(unsafe { raw.as_wide() }, code_page)
}

/*
 * The command line split into arguments by the shell's quoting rules,
 * each encoded for the host. Arguments whose encoding fails under the
 * active code page are skipped; a failed split yields an empty list.
 */
pub fn command_line_arguments(code_page: u32) -> Vec<Vec<u8>> {
    let mut count = 0i32;
    let argv = unsafe { CommandLineToArgvW(GetCommandLineW(), &mut count) };
    if argv.is_null() {
        log::warn!("System: CommandLineToArgvW failed");
        return Vec::new();
    }
    let mut arguments = Vec::with_capacity(count.max(0) as usize);
    for i in 0..count.max(0) as usize {
        let argument = unsafe { *argv.add(i) };
        if argument.is_null() {
            continue;
        }
        if let Some(bytes) = encode_wide(unsafe { argument.as_wide() }, code_page) {
            arguments.push(bytes);
        }
    }
    // The argument table is one LocalAlloc block.
    let _ = unsafe {
        windows::Win32::Foundation::LocalFree(Some(HLOCAL(argv as *mut core::ffi::c_void)))
    };
    arguments
}
