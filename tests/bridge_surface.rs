/*
 * Integration tests for the public bridge surface, driven the way an
 * embedding host would drive it: symbolic arguments arrive as strings and
 * the context is threaded through every call.
 */

use std::sync::Once;

use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use winbridge::{BridgeContext, CodePageValue, OwnerMode, ShellExecuteOutcome};

static INIT_LOGGING: Once = Once::new();

fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = TermLogger::init(
            LevelFilter::Debug,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        );
    });
}

#[test]
fn symbolic_code_page_round_trip_through_the_context() {
    init_logging();
    let mut context = BridgeContext::new();
    assert_eq!(context.code_page(), winbridge::DEFAULT_CODE_PAGE);

    context
        .set_code_page(CodePageValue::Name("ansi"))
        .expect("'ansi' is an enumerated option");
    assert_eq!(context.code_page(), 0);

    context
        .set_code_page(CodePageValue::Id(65001))
        .expect("numeric identifiers pass through");
    assert_eq!(context.code_page(), 65001);
}

#[test]
fn bogus_symbolic_names_are_rejected_before_any_state_change() {
    init_logging();
    let mut context = BridgeContext::new();
    assert!(context.set_code_page(CodePageValue::Name("bogus")).is_err());
    assert_eq!(context.code_page(), winbridge::DEFAULT_CODE_PAGE);
    assert!("bogus".parse::<OwnerMode>().is_err());
}

#[test]
fn owner_mode_names_parse_like_the_host_passes_them() {
    init_logging();
    let mut context = BridgeContext::new();
    // A test process has no top-level windows, so resolution reports no
    // owner without failing.
    let mode: OwnerMode = "process-check".parse().unwrap();
    let _ = context.set_owner_mode(mode);
    let _ = context.set_owner_mode("none".parse().unwrap());
    assert_eq!(context.owner_handle(), None);
}

#[test]
fn shell_execute_classification_follows_the_os_threshold() {
    assert_eq!(
        ShellExecuteOutcome::from_result_code(2),
        ShellExecuteOutcome::Failed(2)
    );
    assert_eq!(
        ShellExecuteOutcome::from_result_code(42),
        ShellExecuteOutcome::Launched
    );
}

#[cfg(windows)]
mod windows_surface {
    use super::init_logging;
    use winbridge::process::{self, WAIT_FAILED};

    #[test]
    fn process_wait_on_a_bogus_pid_reports_the_failure_sentinel() {
        init_logging();
        let (status, code) = process::wait_for_exit(0x7FFF_FFFD, Some(100), true);
        assert_eq!(status, WAIT_FAILED);
        assert_eq!(code, None);
    }

    #[test]
    fn system_passthroughs_agree_with_the_console_name() {
        init_logging();
        let mut context = winbridge::BridgeContext::new();
        let direct = winbridge::system::console_output_code_page();
        context
            .set_code_page(winbridge::CodePageValue::Name("console"))
            .expect("'console' resolves on Windows");
        assert_eq!(context.code_page(), direct);
    }
}
