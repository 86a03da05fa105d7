/*
 * Dialog-producing operations: the common file open/save dialogs, the
 * message box, and shell-execute. Each one decodes its optional host-string
 * arguments under the context's active code page, parents itself to the
 * resolved owner window, invokes the Win32 call, and encodes any resulting
 * paths back into host bytes. A cancelled dialog is a normal empty result,
 * never an error.
 *
 * The shell-execute success test reproduces the documented Win32
 * convention: `ShellExecuteW` returns a pseudo instance handle, and any
 * value above 32 means the launch succeeded while values at or below 32
 * are error codes. That threshold is part of the external contract and is
 * kept verbatim rather than collapsed into a truthy check.
 */

#[cfg(not(windows))]
use crate::context::BridgeContext;
#[cfg(not(windows))]
use crate::error::Result;

// Result-buffer sizing for the file dialogs: room for one directory prefix
// plus two dozen file names.
#[cfg(windows)]
const FOLDER_NAME_MAX: usize = 512;
#[cfg(windows)]
const FILE_NAME_MAX: usize = 64;
#[cfg(windows)]
const MULTI_SELECT_MAX: usize = 24;
#[cfg(windows)]
const FILE_BUFFER_LEN: usize = FOLDER_NAME_MAX + FILE_NAME_MAX * MULTI_SELECT_MAX;

/// `ShellExecuteW` reports success with any pseudo-handle above this value.
pub const SHELL_EXECUTE_SUCCESS_THRESHOLD: isize = 32;

/*
 * Outcome of a shell-execute request. `Failed` carries the OS's own result
 * code (for example 2, ERROR_FILE_NOT_FOUND) for the host to inspect; the
 * bridge never reinterprets it.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellExecuteOutcome {
    Launched,
    Failed(isize),
}

impl ShellExecuteOutcome {
    /// Classifies a raw `ShellExecuteW` return value by the > 32 rule.
    pub fn from_result_code(code: isize) -> Self {
        if code > SHELL_EXECUTE_SUCCESS_THRESHOLD {
            ShellExecuteOutcome::Launched
        } else {
            ShellExecuteOutcome::Failed(code)
        }
    }
}

#[cfg(windows)]
mod native {
    use super::{FILE_BUFFER_LEN, ShellExecuteOutcome};
    use crate::context::BridgeContext;
    use crate::encoding::{decode_host, encode_wide, wide_nul};
    use crate::error::Result;
    use crate::multi_select::parse_file_dialog_buffer;

    use windows::Win32::Foundation::{HINSTANCE, HWND};
    use windows::Win32::System::LibraryLoader::GetModuleHandleW;
    use windows::Win32::UI::Controls::Dialogs::{
        COMMON_DLG_ERRORS, CommDlgExtendedError, GetOpenFileNameW, GetSaveFileNameW,
        OFN_ALLOWMULTISELECT, OFN_EXPLORER, OFN_LONGNAMES, OFN_NOCHANGEDIR, OPEN_FILENAME_FLAGS,
        OPENFILENAMEW,
    };
    use windows::Win32::UI::Shell::ShellExecuteW;
    use windows::Win32::UI::WindowsAndMessaging::{
        MB_OK, MESSAGEBOX_STYLE, MessageBoxW, SW_SHOWNORMAL,
    };
    use windows::core::{PCWSTR, PWSTR};

    const DEFAULT_DIALOG_FLAGS: OPEN_FILENAME_FLAGS =
        OPEN_FILENAME_FLAGS(OFN_LONGNAMES.0 | OFN_NOCHANGEDIR.0 | OFN_EXPLORER.0);

    // PCWSTR view of an optional NUL-terminated wide string; null when the
    // argument was omitted or its decode failed.
    fn optional_pcwstr(wide: &Option<Vec<u16>>) -> PCWSTR {
        wide.as_ref()
            .map_or(PCWSTR::null(), |units| PCWSTR(units.as_ptr()))
    }

    impl BridgeContext {
        fn owner_hwnd(&self) -> Option<HWND> {
            self.owner_handle()
                .map(|handle| HWND(handle as *mut core::ffi::c_void))
        }

        /*
         * Shows the "Open" dialog. The returned paths are full paths in
         * OS-native selection order, encoded in the active code page; an
         * empty vector means the user cancelled or selected nothing.
         */
        pub fn open_file_dialog(
            &self,
            initial_filename: Option<&[u8]>,
            multi_select: bool,
        ) -> Result<Vec<Vec<u8>>> {
            let mut flags = DEFAULT_DIALOG_FLAGS;
            if multi_select {
                flags |= OFN_ALLOWMULTISELECT;
            }
            self.run_file_dialog(false, flags, initial_filename)
        }

        /// Shows the "Save As" dialog; `None` when the user cancelled.
        pub fn save_file_dialog(&self, initial_filename: Option<&[u8]>) -> Result<Option<Vec<u8>>> {
            let mut paths = self.run_file_dialog(true, DEFAULT_DIALOG_FLAGS, initial_filename)?;
            Ok(if paths.is_empty() {
                None
            } else {
                Some(paths.swap_remove(0))
            })
        }

        fn run_file_dialog(
            &self,
            save: bool,
            flags: OPEN_FILENAME_FLAGS,
            initial_filename: Option<&[u8]>,
        ) -> Result<Vec<Vec<u8>>> {
            let mut file_buffer = vec![0u16; FILE_BUFFER_LEN];
            if let Some(name) = decode_host(initial_filename, self.code_page()) {
                // Leave room for the dialog's own terminator.
                let len = name.len().min(file_buffer.len() - 1);
                file_buffer[..len].copy_from_slice(&name[..len]);
            }

            let h_instance: HINSTANCE = unsafe { GetModuleHandleW(None) }
                .map(Into::into)
                .unwrap_or_default();
            let mut ofn = OPENFILENAMEW {
                lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
                hwndOwner: self.owner_hwnd().unwrap_or_default(),
                hInstance: h_instance,
                lpstrFile: PWSTR(file_buffer.as_mut_ptr()),
                nMaxFile: file_buffer.len() as u32,
                Flags: flags,
                ..Default::default()
            };

            let accepted = if save {
                unsafe { GetSaveFileNameW(&mut ofn) }
            } else {
                unsafe { GetOpenFileNameW(&mut ofn) }
            }
            .as_bool();

            if !accepted {
                // CommDlgExtendedError returns 0 when the user cancelled.
                let extended_error = unsafe { CommDlgExtendedError() };
                if extended_error != COMMON_DLG_ERRORS(0) {
                    log::warn!("Dialogs: file dialog failed, CommDlgExtendedError {extended_error:?}");
                } else {
                    log::debug!("Dialogs: file dialog cancelled by user");
                }
                return Ok(Vec::new());
            }

            let multi_select = (ofn.Flags & OFN_ALLOWMULTISELECT) != OPEN_FILENAME_FLAGS(0);
            let paths = parse_file_dialog_buffer(&file_buffer, multi_select);
            log::debug!("Dialogs: file dialog returned {} path(s)", paths.len());
            Ok(paths
                .iter()
                .filter_map(|wide| encode_wide(wide, self.code_page()))
                .collect())
        }

        /*
         * Shows a message box parented to the owner window and returns the
         * raw button result. `style` is passed through to `MessageBoxW`
         * verbatim (default MB_OK); its meaning is defined by the OS.
         */
        pub fn message_box(
            &self,
            text: Option<&[u8]>,
            caption: Option<&[u8]>,
            style: Option<u32>,
        ) -> Result<i32> {
            let text = decode_host(text, self.code_page()).map(wide_nul);
            let caption = decode_host(caption, self.code_page()).map(wide_nul);
            let style = style.map_or(MB_OK, MESSAGEBOX_STYLE);
            let result = unsafe {
                MessageBoxW(
                    self.owner_hwnd(),
                    optional_pcwstr(&text),
                    optional_pcwstr(&caption),
                    style,
                )
            };
            Ok(result.0)
        }

        /*
         * Asks the shell to perform `operation` (open, print, ...) on
         * `target`. All four string arguments are independently optional; a
         * failed decode of one degrades that argument to null rather than
         * aborting the call.
         */
        pub fn shell_execute(
            &self,
            operation: Option<&[u8]>,
            target: Option<&[u8]>,
            parameters: Option<&[u8]>,
            directory: Option<&[u8]>,
        ) -> Result<ShellExecuteOutcome> {
            let code_page = self.code_page();
            let operation = decode_host(operation, code_page).map(wide_nul);
            let target = decode_host(target, code_page).map(wide_nul);
            let parameters = decode_host(parameters, code_page).map(wide_nul);
            let directory = decode_host(directory, code_page).map(wide_nul);

            let instance = unsafe {
                ShellExecuteW(
                    self.owner_hwnd(),
                    optional_pcwstr(&operation),
                    optional_pcwstr(&target),
                    optional_pcwstr(&parameters),
                    optional_pcwstr(&directory),
                    SW_SHOWNORMAL,
                )
            };
            let outcome = ShellExecuteOutcome::from_result_code(instance.0 as isize);
            if let ShellExecuteOutcome::Failed(code) = outcome {
                log::debug!("Dialogs: ShellExecuteW reported failure code {code}");
            }
            Ok(outcome)
        }
    }
}

#[cfg(not(windows))]
impl BridgeContext {
    pub fn open_file_dialog(
        &self,
        _initial_filename: Option<&[u8]>,
        _multi_select: bool,
    ) -> Result<Vec<Vec<u8>>> {
        Err(crate::error::BridgeError::Unsupported(
            "file dialogs need the Win32 common dialog library",
        ))
    }

    pub fn save_file_dialog(&self, _initial_filename: Option<&[u8]>) -> Result<Option<Vec<u8>>> {
        Err(crate::error::BridgeError::Unsupported(
            "file dialogs need the Win32 common dialog library",
        ))
    }

    pub fn message_box(
        &self,
        _text: Option<&[u8]>,
        _caption: Option<&[u8]>,
        _style: Option<u32>,
    ) -> Result<i32> {
        Err(crate::error::BridgeError::Unsupported(
            "message boxes need the Win32 window manager",
        ))
    }

    pub fn shell_execute(
        &self,
        _operation: Option<&[u8]>,
        _target: Option<&[u8]>,
        _parameters: Option<&[u8]>,
        _directory: Option<&[u8]>,
    ) -> Result<ShellExecuteOutcome> {
        Err(crate::error::BridgeError::Unsupported(
            "shell execute needs the Win32 shell",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_execute_codes_at_or_below_32_are_failures() {
        // 2 is ERROR_FILE_NOT_FOUND, the classic failure case.
        assert_eq!(
            ShellExecuteOutcome::from_result_code(2),
            ShellExecuteOutcome::Failed(2)
        );
        assert_eq!(
            ShellExecuteOutcome::from_result_code(32),
            ShellExecuteOutcome::Failed(32)
        );
        assert_eq!(
            ShellExecuteOutcome::from_result_code(0),
            ShellExecuteOutcome::Failed(0)
        );
    }

    #[test]
    fn shell_execute_codes_above_32_are_successes() {
        assert_eq!(
            ShellExecuteOutcome::from_result_code(33),
            ShellExecuteOutcome::Launched
        );
        assert_eq!(
            ShellExecuteOutcome::from_result_code(42),
            ShellExecuteOutcome::Launched
        );
    }
}
