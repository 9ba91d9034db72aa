use anyhow::Context;
use boltz_core::domain::HarnessErrorCategory;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::warn;

static INTERRUPT_FLAG: OnceLock<Arc<AtomicBool>> = OnceLock::new();

/// Keeps `boltz-run` alive on Ctrl+C so the run can end through the
/// `Interrupted` path instead of being killed by the signal.
///
/// The solver shares the terminal's process group and still receives the
/// interrupt. A second Ctrl+C exits at once with the interrupt exit code.
pub(super) fn install_handler() -> anyhow::Result<Arc<AtomicBool>> {
    if let Some(flag) = INTERRUPT_FLAG.get() {
        return Ok(Arc::clone(flag));
    }

    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = Arc::clone(&flag);
    ctrlc::set_handler(move || {
        if handler_flag.swap(true, Ordering::SeqCst) {
            std::process::exit(HarnessErrorCategory::Interrupted.exit_code());
        }
        warn!("interrupt received; waiting for the solver to stop");
    })
    .context("failed to install the Ctrl+C handler")?;

    Ok(Arc::clone(INTERRUPT_FLAG.get_or_init(|| flag)))
}
