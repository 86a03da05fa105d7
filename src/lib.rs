/*
 * winbridge exposes a curated slice of Win32 to an embedding host through a
 * narrow, stable call surface: code-page-aware text transcoding, owner
 * window resolution for dialog parenting, the common file dialogs, message
 * boxes, shell execute, and synchronous process lifecycle control.
 *
 * All host-string arguments and results are byte strings in the context's
 * active code page; the bridge converts to and from the OS's UTF-16
 * representation at every boundary. Process-wide settings (active code
 * page, owner window) live in an explicit `BridgeContext` rather than
 * globals; the bridge assumes the host calls it from one thread at a time
 * and applies no locking of its own. OS handles are scoped to a single
 * operation and released before it returns.
 *
 * Expected absences (cancelled dialog, vanished process, omitted optional
 * argument) come back as `None` / empty results or the OS's own failure
 * sentinels; `BridgeError` is reserved for invalid enumerated arguments
 * and genuine operational failures.
 */

pub mod context;
pub mod dialogs;
pub mod encoding;
pub mod error;
pub mod multi_select;
pub mod owner;
pub mod process;
#[cfg(windows)]
pub mod system;

pub use context::BridgeContext;
pub use dialogs::{SHELL_EXECUTE_SUCCESS_THRESHOLD, ShellExecuteOutcome};
pub use encoding::{CodePageValue, DEFAULT_CODE_PAGE};
pub use error::{BridgeError, Result};
pub use owner::{OwnerMode, RawWindowHandle, WindowProbe};
pub use process::{STILL_ACTIVE, WAIT_ABANDONED, WAIT_FAILED, WAIT_OBJECT_0, WAIT_TIMEOUT};
