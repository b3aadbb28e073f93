use std::sync::{Mutex, MutexGuard};

static PENDING: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn pending() -> MutexGuard<'static, Option<Vec<String>>> {
    PENDING.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Start holding warnings back. Called right before the form takes over the
/// terminal.
pub fn activate() {
    *pending() = Some(Vec::new());
}

/// Stop holding warnings back and hand over everything collected.
pub fn drain() -> Vec<String> {
    pending().take().unwrap_or_default()
}

/// Emit a warning, or queue it while the form owns the screen.
pub fn warn(msg: String) {
    let mut guard = pending();
    match guard.as_mut() {
        Some(queue) => queue.push(msg),
        None => {
            drop(guard);
            eprintln!("{}", msg);
        }
    }
}

/// `eprintln!` that respects [`activate`]/[`drain`].
#[macro_export]
macro_rules! buffered_eprintln {
    ($($arg:tt)*) => {
        $crate::stderr_buffer::warn(format!($($arg)*))
    };
}
