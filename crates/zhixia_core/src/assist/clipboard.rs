//! Copying assist output to the system clipboard.

use log::error;
use std::error::Error;

/// Destination for "copy result" actions.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// Copies `text` and reports whether the "copied" confirmation should show.
///
/// Failures are logged and swallowed.
pub fn copy_result(clipboard: &mut dyn Clipboard, text: &str) -> bool {
    match clipboard.write_text(text) {
        Ok(()) => true,
        Err(err) => {
            error!(
                "event=clipboard_copy module=assist status=error chars={} error={err}",
                text.chars().count()
            );
            false
        }
    }
}
