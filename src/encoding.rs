/*
 * Text transcoding between the embedding host's byte strings and the
 * UTF-16 wide strings consumed by the Win32 API, governed by a numeric
 * code page. Conversions follow the Win32 two-phase protocol: measure the
 * required output length with no destination buffer, allocate exactly that
 * much, then convert. Callers never see the two phases.
 *
 * An omitted host string (`None`) decodes to `None`; that is the normal
 * shape for unset optional arguments, not a failure. A conversion the OS
 * rejects (zero required length for non-empty input) also yields `None`,
 * and callers are expected to tolerate it per argument.
 *
 * The module also owns the symbolic code-page table (`default`, `console`,
 * `utf-8`, `ansi`, `oem`, `symbol`) used by `BridgeContext::set_code_page`.
 */

use crate::error::{BridgeError, Result};

#[cfg(windows)]
use windows::Win32::Globalization::{
    MULTI_BYTE_TO_WIDE_CHAR_FLAGS, MultiByteToWideChar, WideCharToMultiByte,
};
#[cfg(windows)]
use windows::core::PCSTR;

// Win32 code-page identifiers. CP_ACP/CP_OEMCP/CP_SYMBOL/CP_UTF8 from
// WinNls.h, kept as plain integers so the table is usable on any target.
pub const CODE_PAGE_ANSI: u32 = 0;
pub const CODE_PAGE_OEM: u32 = 1;
pub const CODE_PAGE_SYMBOL: u32 = 42;
pub const CODE_PAGE_UTF8: u32 = 65001;

/// The code page a fresh `BridgeContext` starts with.
pub const DEFAULT_CODE_PAGE: u32 = CODE_PAGE_UTF8;

const CODE_PAGE_NAMES: &str = "default, console, utf-8, ansi, oem, symbol";

/*
 * A caller-supplied code-page selector: either a raw numeric identifier
 * passed through verbatim, or one of the symbolic names resolved by
 * `resolve_code_page`.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodePageValue<'a> {
    Id(u32),
    Name(&'a str),
}

/*
 * Resolves a code-page selector to a numeric identifier.
 *
 * `console` queries the console's current output code page at call time on
 * every resolution; the console code page can change independently of this
 * bridge, so the value is never memoized. An unrecognized name is rejected
 * before any OS call, leaving the caller's current setting untouched.
 */
pub fn resolve_code_page(value: &CodePageValue<'_>) -> Result<u32> {
    match value {
        CodePageValue::Id(id) => Ok(*id),
        CodePageValue::Name(name) => match *name {
            "default" => Ok(DEFAULT_CODE_PAGE),
            "console" => console_output_code_page(),
            "utf-8" => Ok(CODE_PAGE_UTF8),
            "ansi" => Ok(CODE_PAGE_ANSI),
            "oem" => Ok(CODE_PAGE_OEM),
            "symbol" => Ok(CODE_PAGE_SYMBOL),
            other => Err(BridgeError::InvalidArgument(format!(
                "unknown code page name '{other}' (expected one of: {CODE_PAGE_NAMES})"
            ))),
        },
    }
}

#[cfg(windows)]
fn console_output_code_page() -> Result<u32> {
    Ok(unsafe { windows::Win32::System::Console::GetConsoleOutputCP() })
}

#[cfg(not(windows))]
fn console_output_code_page() -> Result<u32> {
    Err(BridgeError::Unsupported(
        "the 'console' code page needs a Win32 console",
    ))
}

/*
 * Decodes an optional host byte string into UTF-16 code units under the
 * given code page. The result carries no NUL terminator; `wide_nul` appends
 * one where a PCWSTR is needed.
 */
#[cfg(windows)]
pub fn decode_host(bytes: Option<&[u8]>, code_page: u32) -> Option<Vec<u16>> {
    let bytes = bytes?;
    if bytes.is_empty() {
        return Some(Vec::new());
    }
    let flags = MULTI_BYTE_TO_WIDE_CHAR_FLAGS(0);
    let required = unsafe { MultiByteToWideChar(code_page, flags, bytes, None) };
    if required <= 0 {
        log::warn!(
            "Encoding: MultiByteToWideChar rejected {} byte(s) under code page {code_page}",
            bytes.len()
        );
        return None;
    }
    let mut wide = vec![0u16; required as usize];
    let written = unsafe { MultiByteToWideChar(code_page, flags, bytes, Some(&mut wide)) };
    if written <= 0 {
        log::warn!("Encoding: MultiByteToWideChar fill phase failed under code page {code_page}");
        return None;
    }
    wide.truncate(written as usize);
    Some(wide)
}

/*
 * Encodes UTF-16 code units back into a host byte string under the given
 * code page. Returns `None` when the OS rejects the conversion.
 */
#[cfg(windows)]
pub fn encode_wide(wide: &[u16], code_page: u32) -> Option<Vec<u8>> {
    if wide.is_empty() {
        return Some(Vec::new());
    }
    let required = unsafe { WideCharToMultiByte(code_page, 0, wide, None, PCSTR::null(), None) };
    if required <= 0 {
        log::warn!(
            "Encoding: WideCharToMultiByte rejected {} unit(s) under code page {code_page}",
            wide.len()
        );
        return None;
    }
    let mut bytes = vec![0u8; required as usize];
    let written =
        unsafe { WideCharToMultiByte(code_page, 0, wide, Some(&mut bytes), PCSTR::null(), None) };
    if written <= 0 {
        log::warn!("Encoding: WideCharToMultiByte fill phase failed under code page {code_page}");
        return None;
    }
    bytes.truncate(written as usize);
    Some(bytes)
}

// Appends the NUL terminator the Win32 string APIs expect.
#[cfg(windows)]
pub(crate) fn wide_nul(mut wide: Vec<u16>) -> Vec<u16> {
    wide.push(0);
    wide
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_accepts_numeric_identifiers_verbatim() {
        assert_eq!(resolve_code_page(&CodePageValue::Id(1252)).unwrap(), 1252);
        assert_eq!(resolve_code_page(&CodePageValue::Id(0)).unwrap(), 0);
    }

    #[test]
    fn resolve_maps_symbolic_names() {
        assert_eq!(
            resolve_code_page(&CodePageValue::Name("default")).unwrap(),
            DEFAULT_CODE_PAGE
        );
        assert_eq!(
            resolve_code_page(&CodePageValue::Name("utf-8")).unwrap(),
            CODE_PAGE_UTF8
        );
        assert_eq!(
            resolve_code_page(&CodePageValue::Name("ansi")).unwrap(),
            CODE_PAGE_ANSI
        );
        assert_eq!(
            resolve_code_page(&CodePageValue::Name("oem")).unwrap(),
            CODE_PAGE_OEM
        );
        assert_eq!(
            resolve_code_page(&CodePageValue::Name("symbol")).unwrap(),
            CODE_PAGE_SYMBOL
        );
    }

    #[test]
    fn resolve_rejects_unknown_names() {
        let err = resolve_code_page(&CodePageValue::Name("bogus")).unwrap_err();
        match err {
            BridgeError::InvalidArgument(msg) => {
                assert!(msg.contains("bogus"), "message should name the input: {msg}");
                assert!(
                    msg.contains("console"),
                    "message should enumerate the options: {msg}"
                );
            }
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }

    #[cfg(windows)]
    #[test]
    fn utf8_round_trip_preserves_host_bytes() {
        let original = "påth\\to\\ファイル.txt".as_bytes();
        let wide = decode_host(Some(original), CODE_PAGE_UTF8).expect("decode failed");
        let bytes = encode_wide(&wide, CODE_PAGE_UTF8).expect("encode failed");
        assert_eq!(bytes, original);
    }

    #[cfg(windows)]
    #[test]
    fn decode_of_omitted_argument_is_no_value() {
        assert_eq!(decode_host(None, CODE_PAGE_UTF8), None);
    }

    #[cfg(windows)]
    #[test]
    fn decode_of_empty_string_is_empty_not_failure() {
        assert_eq!(decode_host(Some(b""), CODE_PAGE_UTF8), Some(Vec::new()));
    }

    #[cfg(windows)]
    #[test]
    fn console_name_resolves_to_live_console_code_page() {
        let resolved = resolve_code_page(&CodePageValue::Name("console")).unwrap();
        let direct = unsafe { windows::Win32::System::Console::GetConsoleOutputCP() };
        assert_eq!(resolved, direct);
    }
}
