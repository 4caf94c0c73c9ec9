//! Env-gated diagnostic trace.
//!
//! Set `CHESS_MATCH_TRACE=1` (or `true`) to print one line per traced match
//! event to stderr, stamped with milliseconds since the first event. Detail
//! strings are built lazily so a disabled trace costs one cached flag read.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

pub const TRACE_ENV_VAR: &str = "CHESS_MATCH_TRACE";

static START: OnceLock<Instant> = OnceLock::new();
static ENABLED: OnceLock<bool> = OnceLock::new();
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

fn parse_flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

pub fn enabled() -> bool {
    *ENABLED.get_or_init(|| {
        std::env::var(TRACE_ENV_VAR)
            .map(|v| parse_flag(&v))
            .unwrap_or(false)
    })
}

/// Record `label` with a lazily formatted detail.
pub fn event<F>(label: &'static str, detail: F)
where
    F: FnOnce() -> String,
{
    if !enabled() {
        return;
    }
    let start = START.get_or_init(Instant::now);
    let seq = EVENT_SEQ.fetch_add(1, Ordering::Relaxed);
    eprintln!(
        "[chess_match +{}ms #{seq}] {label}: {}",
        start.elapsed().as_millis(),
        detail()
    );
}
