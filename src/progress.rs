//! Transfer progress bar construction.
//!
//! The bar is a transient UI element: callers must `finish_and_clear()` it
//! so nothing persists on screen after the transfer.

use indicatif::{ProgressBar, ProgressStyle};

/// Template when the expected total size is known.
const BAR_TEMPLATE: &str = "{msg} [{bar:40}] {bytes}/{total_bytes} ({eta})";

/// Template when the server declared no content length.
const SPINNER_TEMPLATE: &str = "{msg} {spinner} {bytes}";

/// Builds a progress bar for one transfer.
///
/// With a known `total` this is a determinate bar counting bytes against the
/// expected size; with `total == 0` (unknown) it degrades to a byte-counting
/// spinner. The `{bytes}` formatter scales automatically (KiB/MiB).
pub(crate) fn transfer_bar(total: u64, label: &str) -> ProgressBar {
    let bar = if total > 0 {
        let bar = ProgressBar::new(total);
        bar.set_style(
            ProgressStyle::with_template(BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        bar
    } else {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template(SPINNER_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar
    };
    bar.set_message(label.to_string());
    bar
}
