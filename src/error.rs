// Represents errors that can occur within the bridge.
//
// This enum centralizes error handling for the narrow call surface exposed
// to the embedding host: invalid symbolic arguments, operations that cannot
// be carried out, and raw Win32 failures. Expected absences (a cancelled
// dialog, a process that is already gone, an omitted optional argument) are
// *not* errors and are modelled as `None` / empty results by the individual
// operations instead.
#[derive(Debug, Clone)]
pub enum BridgeError {
    /// An error originating from the Windows API.
    #[cfg(windows)]
    Win32(windows::core::Error),
    /// A symbolic argument was not one of the enumerated options.
    InvalidArgument(String),
    /// A requested operation could not be completed.
    OperationFailed(String),
    /// The operation needs a native facility this target does not provide.
    Unsupported(&'static str),
}

#[cfg(windows)]
impl From<windows::core::Error> for BridgeError {
    fn from(err: windows::core::Error) -> Self {
        BridgeError::Win32(err)
    }
}

impl std::fmt::Display for BridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(windows)]
            BridgeError::Win32(e) => write!(f, "Win32 Error: {}", e),
            BridgeError::InvalidArgument(s) => write!(f, "Invalid Argument: {}", s),
            BridgeError::OperationFailed(s) => write!(f, "Operation Failed: {}", s),
            BridgeError::Unsupported(s) => write!(f, "Unsupported On This Target: {}", s),
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(windows)]
            BridgeError::Win32(e) => Some(e),
            _ => None,
        }
    }
}

/// A specialized `Result` type for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
