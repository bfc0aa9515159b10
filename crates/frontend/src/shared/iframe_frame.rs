//! Embedded page with bounded retries.
//!
//! `IframeLoader` decides what happens; this component only mounts iframes,
//! owns the single pending timer and renders the loading / error overlays.
//! Each attempt mounts a fresh `<iframe>` whose events carry its generation,
//! so late events from a replaced frame are ignored by the loader.

use contracts::dashboard::iframe_loader::{
    IframeLoader, LoadPhase, LoaderCommand, SLOW_LOAD_HINT_MS,
};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlIFrameElement;

use crate::layout::global_context::use_global_context;

/// At most one pending timer. The previous handle is dropped (which cancels
/// a gloo `Timeout`) before the next one is created.
struct TimerSlot<T: 'static = Timeout> {
    handle: StoredValue<Option<T>, LocalStorage>,
}

impl<T: 'static> Clone for TimerSlot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for TimerSlot<T> {}

impl<T: 'static> TimerSlot<T> {
    fn new() -> Self {
        Self {
            handle: StoredValue::new_local(None),
        }
    }

    /// No-op once the owning component is gone
    fn arm(&self, make: impl FnOnce() -> T) {
        self.clear();
        self.handle.try_update_value(|slot| *slot = Some(make()));
    }

    fn clear(&self) {
        // dropped after the write guard is released
        let previous = self.handle.try_update_value(Option::take).flatten();
        drop(previous);
    }

    #[cfg(test)]
    fn is_armed(&self) -> bool {
        self.handle.try_with_value(Option::is_some).unwrap_or(false)
    }
}

#[derive(Clone, Copy)]
struct FrameHandles {
    loader: StoredValue<IframeLoader>,
    timer: TimerSlot,
    slow_timer: TimerSlot,
    generation: RwSignal<u64>,
    phase: RwSignal<LoadPhase>,
    attempt: RwSignal<u32>,
    error: RwSignal<Option<String>>,
    slow: RwSignal<bool>,
    retry_pending: RwSignal<bool>,
}

impl FrameHandles {
    fn step(&self, f: impl FnOnce(&mut IframeLoader) -> LoaderCommand) -> LoaderCommand {
        self.loader
            .try_update_value(f)
            .unwrap_or(LoaderCommand::Ignore)
    }

    fn clear_timers(&self) {
        self.timer.clear();
        self.slow_timer.clear();
    }

    fn sync_attempt(&self) {
        if let Some(loader) = self.loader.try_get_value() {
            self.attempt.set(loader.display_attempt());
        }
    }
}

fn apply(h: FrameHandles, command: LoaderCommand) {
    match command {
        LoaderCommand::BeginAttempt {
            attempt,
            generation,
            timeout_ms,
        } => {
            log::debug!(
                "Frame attempt {} (generation {}, timeout {} ms)",
                attempt + 1,
                generation,
                timeout_ms
            );
            h.clear_timers();
            h.error.set(None);
            h.slow.set(false);
            h.retry_pending.set(false);
            h.phase.set(LoadPhase::Loading);
            h.sync_attempt();
            h.generation.set(generation);

            h.timer.arm(|| {
                Timeout::new(timeout_ms, move || {
                    let next = h.step(|l| l.on_timeout(generation));
                    apply(h, next);
                })
            });
            h.slow_timer.arm(|| {
                Timeout::new(SLOW_LOAD_HINT_MS, move || {
                    if h.generation.try_get_untracked() == Some(generation)
                        && h.phase.try_get_untracked() == Some(LoadPhase::Loading)
                    {
                        h.slow.set(true);
                    }
                })
            });
        }
        LoaderCommand::ScheduleRetry {
            generation,
            delay_ms,
        } => {
            log::debug!("Frame error, retrying in {} ms", delay_ms);
            h.clear_timers();
            h.retry_pending.set(true);
            h.sync_attempt();
            h.timer.arm(|| {
                Timeout::new(delay_ms, move || {
                    let next = h.step(|l| l.resume(generation));
                    apply(h, next);
                })
            });
        }
        LoaderCommand::ShowLoaded => {
            h.clear_timers();
            h.slow.set(false);
            h.retry_pending.set(false);
            h.phase.set(LoadPhase::Loaded);
        }
        LoaderCommand::ShowError { message } => {
            log::warn!("Frame failed: {}", message);
            h.clear_timers();
            h.slow.set(false);
            h.retry_pending.set(false);
            h.phase.set(LoadPhase::Failed);
            h.error.set(Some(message));
        }
        LoaderCommand::Ignore => {}
    }
}

fn browser_online() -> bool {
    web_sys::window()
        .map(|w| w.navigator().on_line())
        .unwrap_or(true)
}

/// Same-origin frames still on `about:blank` did not load anything;
/// cross-origin frames cannot be inspected and count as loaded.
fn frame_reachable(iframe: &HtmlIFrameElement) -> bool {
    match iframe.content_document() {
        None => true,
        Some(document) => document.url().map(|u| u != "about:blank").unwrap_or(true),
    }
}

/// Start (or restart) loading, failing fast when the browser is offline
fn begin(h: FrameHandles, restart: bool) {
    let command = if !browser_online() {
        h.step(|l| l.offline())
    } else if restart {
        h.step(|l| l.retry())
    } else {
        h.step(|l| l.start())
    };
    apply(h, command);
}

#[component]
pub fn ManagedFrame(
    /// Page to embed; a change restarts loading
    #[prop(into)]
    src: Signal<String>,
    title: &'static str,
    #[prop(optional)] loading_text: Option<&'static str>,
    /// Extra `allow` attribute for the iframe
    #[prop(optional)]
    allow: Option<&'static str>,
) -> impl IntoView {
    let ctx = use_global_context();
    let config = ctx.portal.with_untracked(|p| p.iframe_loader);

    let h = FrameHandles {
        loader: StoredValue::new(IframeLoader::new(config)),
        timer: TimerSlot::new(),
        slow_timer: TimerSlot::new(),
        generation: RwSignal::new(0),
        phase: RwSignal::new(LoadPhase::Idle),
        attempt: RwSignal::new(1),
        error: RwSignal::new(None),
        slow: RwSignal::new(false),
        retry_pending: RwSignal::new(false),
    };
    let max_attempts = config.max_retries + 1;

    // First run starts loading; a new URL restarts from attempt 1
    Effect::new(move |previous: Option<String>| {
        let url = src.get();
        match previous {
            None => begin(h, false),
            Some(previous) if previous != url => begin(h, true),
            Some(_) => {}
        }
        url
    });

    on_cleanup(move || h.clear_timers());

    let frame = move || {
        let generation = h.generation.get();
        if generation == 0 {
            return view! { <></> }.into_any();
        }
        let url = src.get_untracked();
        view! {
            <iframe
                src=url
                title=title
                allow=allow.unwrap_or("")
                class="managed-frame__iframe"
                class:managed-frame__iframe--hidden=move || h.phase.get() != LoadPhase::Loaded
                on:load=move |ev| {
                    let reachable = ev
                        .target()
                        .and_then(|t| t.dyn_into::<HtmlIFrameElement>().ok())
                        .map(|iframe| frame_reachable(&iframe))
                        .unwrap_or(true);
                    let next = if reachable {
                        h.step(|l| l.on_load(generation))
                    } else {
                        h.step(|l| l.on_error(generation))
                    };
                    apply(h, next);
                }
                on:error=move |_| {
                    let next = h.step(|l| l.on_error(generation));
                    apply(h, next);
                }
            ></iframe>
        }
        .into_any()
    };

    view! {
        <div class="managed-frame">
            <Show when=move || h.phase.get() == LoadPhase::Loading>
                <div class="managed-frame__loading">
                    <div class="spinner"></div>
                    <p>{loading_text.unwrap_or("Loading...")}</p>
                    <Show when=move || { h.attempt.get() > 1 }>
                        <p class="managed-frame__attempt">
                            {move || if h.retry_pending.get() {
                                format!("Retrying... (attempt {} of {})", h.attempt.get(), max_attempts)
                            } else {
                                format!("Attempt {} of {}", h.attempt.get(), max_attempts)
                            }}
                        </p>
                    </Show>
                    <Show when=move || h.slow.get()>
                        <p class="managed-frame__hint">
                            "This may take a moment. The embedded page is still loading..."
                        </p>
                    </Show>
                </div>
            </Show>

            <Show when=move || h.phase.get() == LoadPhase::Failed>
                <div class="managed-frame__error">
                    <strong>"⚠ Unable to load " {title}</strong>
                    <p>{move || h.error.get().unwrap_or_default()}</p>
                    <div class="managed-frame__actions">
                        <button class="btn-primary" on:click=move |_| begin(h, true)>
                            "🔄 Try Again"
                        </button>
                        <a
                            class="btn-secondary"
                            href=move || src.get()
                            target="_blank"
                            rel="noopener noreferrer"
                        >
                            "Open in New Tab"
                        </a>
                    </div>
                </div>
            </Show>

            {frame}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Stands in for a timer handle and records when it is created and dropped
    struct FakeTimer {
        id: u32,
        log: Log,
    }

    impl FakeTimer {
        fn arm(id: u32, log: &Log) -> Self {
            log.borrow_mut().push(format!("arm {id}"));
            Self {
                id,
                log: Rc::clone(log),
            }
        }
    }

    impl Drop for FakeTimer {
        fn drop(&mut self) {
            self.log.borrow_mut().push(format!("drop {}", self.id));
        }
    }

    #[test]
    fn rearming_drops_the_previous_timer_first() {
        let owner = Owner::new();
        let log: Log = Rc::default();

        owner.with(|| {
            let slot = TimerSlot::<FakeTimer>::new();
            slot.arm(|| FakeTimer::arm(1, &log));
            slot.arm(|| FakeTimer::arm(2, &log));
            assert!(slot.is_armed());
            slot.clear();
            assert!(!slot.is_armed());
        });

        assert_eq!(*log.borrow(), ["arm 1", "drop 1", "arm 2", "drop 2"]);
    }

    #[test]
    fn unmount_cancels_the_pending_timer() {
        let owner = Owner::new();
        let log: Log = Rc::default();

        let slot = owner.with(|| {
            let slot = TimerSlot::<FakeTimer>::new();
            on_cleanup(move || slot.clear());
            slot.arm(|| FakeTimer::arm(1, &log));
            slot
        });
        owner.cleanup();

        assert_eq!(*log.borrow(), ["arm 1", "drop 1"]);

        // late callbacks after unmount neither panic nor arm anything
        slot.arm(|| FakeTimer::arm(2, &log));
        slot.clear();
        assert!(!slot.is_armed());
        assert_eq!(log.borrow().len(), 2);
    }
}
