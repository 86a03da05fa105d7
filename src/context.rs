/*
 * The bridge's process-wide mutable state: the active code page used for
 * every host-string conversion, and the owner-window reference used to
 * parent dialogs. Rather than hiding these behind module globals, they
 * live in an explicit context object the embedding host threads through
 * its calls, which makes the single-threaded access discipline a visible
 * part of the API (mutations take `&mut self`, no internal locking).
 *
 * Dialog operations are implemented as further methods on `BridgeContext`
 * in the `dialogs` module, since they consume both settings.
 */

use crate::encoding::{self, CodePageValue, DEFAULT_CODE_PAGE};
use crate::error::Result;
use crate::owner::{OwnerMode, OwnerResolver, RawWindowHandle, WindowProbe};

pub struct BridgeContext {
    code_page: u32,
    owner: OwnerResolver,
}

impl BridgeContext {
    /// A context with the built-in default code page (UTF-8), no owner
    /// window, and the native window probe for this target.
    pub fn new() -> Self {
        #[cfg(windows)]
        let probe: Box<dyn WindowProbe> = Box::new(crate::owner::Win32WindowProbe);
        #[cfg(not(windows))]
        let probe: Box<dyn WindowProbe> = Box::new(crate::owner::NullWindowProbe);
        Self::with_probe(probe)
    }

    /// A context with a caller-supplied window probe. Tests use this to
    /// script the window table.
    pub fn with_probe(probe: Box<dyn WindowProbe>) -> Self {
        BridgeContext {
            code_page: DEFAULT_CODE_PAGE,
            owner: OwnerResolver::new(probe),
        }
    }

    /// The code page every transcoding operation currently observes.
    pub fn code_page(&self) -> u32 {
        self.code_page
    }

    /*
     * Changes the active code page. Symbolic names are resolved through
     * `encoding::resolve_code_page`; an unrecognized name is rejected and
     * the current setting is left untouched.
     */
    pub fn set_code_page(&mut self, value: CodePageValue<'_>) -> Result<()> {
        let resolved = encoding::resolve_code_page(&value)?;
        log::debug!(
            "BridgeContext: active code page {} -> {resolved}",
            self.code_page
        );
        self.code_page = resolved;
        Ok(())
    }

    /// Applies one owner-mode update (see `OwnerMode`) and reports whether
    /// an owner window is set afterwards.
    pub fn set_owner_mode(&mut self, mode: OwnerMode) -> bool {
        self.owner.apply(mode)
    }

    /// The currently remembered owner window, if any.
    pub fn owner_handle(&self) -> Option<RawWindowHandle> {
        self.owner.current()
    }
}

impl Default for BridgeContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::CODE_PAGE_UTF8;
    use crate::owner::NullWindowProbe;

    #[test]
    fn fresh_context_uses_the_utf8_default() {
        let context = BridgeContext::with_probe(Box::new(NullWindowProbe));
        assert_eq!(context.code_page(), CODE_PAGE_UTF8);
        assert_eq!(context.owner_handle(), None);
    }

    #[test]
    fn set_code_page_accepts_numeric_and_symbolic_values() {
        let mut context = BridgeContext::with_probe(Box::new(NullWindowProbe));
        context.set_code_page(CodePageValue::Id(1252)).unwrap();
        assert_eq!(context.code_page(), 1252);
        context.set_code_page(CodePageValue::Name("utf-8")).unwrap();
        assert_eq!(context.code_page(), CODE_PAGE_UTF8);
    }

    #[test]
    fn rejected_code_page_name_leaves_the_setting_unchanged() {
        let mut context = BridgeContext::with_probe(Box::new(NullWindowProbe));
        context.set_code_page(CodePageValue::Id(1252)).unwrap();
        let err = context.set_code_page(CodePageValue::Name("bogus"));
        assert!(err.is_err());
        assert_eq!(context.code_page(), 1252);
    }

    #[test]
    fn owner_mode_updates_flow_through_to_the_resolver() {
        let mut context = BridgeContext::with_probe(Box::new(NullWindowProbe));
        assert!(!context.set_owner_mode(OwnerMode::Process));
        assert!(!context.set_owner_mode(OwnerMode::Check));
        assert_eq!(context.owner_handle(), None);
    }
}
