//! Clipboard helper built on the Web Clipboard API

use wasm_bindgen_futures::spawn_local;

/// Copy text and report the outcome
///
/// `on_done(true)` after a successful write, `on_done(false)` when the
/// clipboard is unavailable or the write was rejected.
pub fn copy_to_clipboard_with_callback<F>(text: &str, on_done: F)
where
    F: FnOnce(bool) + 'static,
{
    let text = text.to_owned();
    spawn_local(async move {
        let Some(window) = web_sys::window() else {
            on_done(false);
            return;
        };
        let clipboard = window.navigator().clipboard();
        let copied = wasm_bindgen_futures::JsFuture::from(clipboard.write_text(&text))
            .await
            .is_ok();
        on_done(copied);
    });
}
