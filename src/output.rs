use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// `--quiet` forces quiet mode; otherwise ADDRBOOK_QUIET decides.
/// Must run before the first `is_quiet` call.
pub fn set_quiet(quiet: bool) {
    if quiet {
        let _ = QUIET.set(true);
    }
}

pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("ADDRBOOK_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}
