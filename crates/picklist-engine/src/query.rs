//! Query controller: filtering-mode switch and remote-mode debounce.
//!
//! Local mode is fully synchronous; the controller just records the text
//! and the engine runs the fuzzy scorer on demand. Remote mode debounces
//! keystrokes into at most one pending filter request: every keystroke
//! cancels the previously scheduled timer and starts a new one, so the
//! request that finally fires carries the latest text.
//!
//! Remote mode schedules its timer with `tokio::spawn` and therefore must
//! run inside a tokio runtime. Local mode has no such requirement.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use picklist_core::FilterMode;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::event::{DropdownEvent, FilterRequest};

/// Quiet period before a filter request fires, from the original control.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(800);

/// Owns the raw query text and, in remote mode, the single-slot debounce
/// timer. The mode is fixed at construction.
pub struct QueryController {
    mode: FilterMode,
    debounce: Duration,
    text: String,
    shared: Arc<Shared>,
}

/// State the debounce task shares with the controller.
struct Shared {
    /// Bumped on every remote keystroke; a timer only fires if its stamp
    /// is still current when the quiet period elapses.
    generation: AtomicU64,

    /// Set on teardown. A timer firing after the control is gone is a no-op.
    torn_down: AtomicBool,

    /// At most one scheduled timer per controller.
    pending: Mutex<Option<JoinHandle<()>>>,

    tx: UnboundedSender<DropdownEvent>,
}

impl QueryController {
    /// Create a controller emitting filter requests on the given channel.
    pub fn new(mode: FilterMode, tx: UnboundedSender<DropdownEvent>) -> Self {
        Self {
            mode,
            debounce: DEFAULT_DEBOUNCE,
            text: String::new(),
            shared: Arc::new(Shared {
                generation: AtomicU64::new(0),
                torn_down: AtomicBool::new(false),
                pending: Mutex::new(None),
                tx,
            }),
        }
    }

    /// Override the quiet period.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Override the quiet period in place.
    pub fn set_debounce(&mut self, debounce: Duration) {
        self.debounce = debounce;
    }

    /// The filtering mode, fixed at construction.
    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// The raw query text as of the last keystroke.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The stamp the next filter request will carry.
    ///
    /// Responses are valid only while their request's stamp equals this.
    pub fn current_generation(&self) -> u64 {
        self.shared.generation.load(Ordering::SeqCst)
    }

    /// Record a keystroke.
    ///
    /// Local mode only records the text; the caller reruns the scorer.
    /// Remote mode (re)starts the debounce timer: the previously scheduled
    /// timer, if any, is cancelled outright.
    pub fn on_query_change(&mut self, text: impl Into<String>) {
        self.text = text.into();

        if !self.mode.is_remote() {
            return;
        }

        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let shared = self.shared.clone();
        let text = self.text.clone();
        let debounce = self.debounce;

        tracing::debug!(generation, delay_ms = debounce.as_millis() as u64, "debounce restarted");

        let handle = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            if shared.torn_down.load(Ordering::SeqCst) {
                return;
            }
            if shared.generation.load(Ordering::SeqCst) != generation {
                // Superseded while sleeping; abort should have caught this,
                // but the stamp check makes it airtight.
                return;
            }

            tracing::debug!(generation, %text, "debounce elapsed, emitting filter request");
            let _ = shared
                .tx
                .send(DropdownEvent::FilterRequested(FilterRequest { text, generation }));
        });

        let mut pending = self.shared.pending.lock();
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Clear the query text and cancel any pending timer.
    ///
    /// Called when the option list changes underneath the query; stale
    /// text must not be treated as still valid against a new list.
    pub fn reset(&mut self) {
        self.text.clear();
        self.cancel_pending();
    }

    /// Tear the controller down. Any timer that fires afterwards is a no-op.
    pub fn teardown(&self) {
        self.shared.torn_down.store(true, Ordering::SeqCst);
        self.cancel_pending();
    }

    fn cancel_pending(&self) {
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.shared.pending.lock().take() {
            handle.abort();
        }
    }
}

impl Drop for QueryController {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;
    use tokio::task::yield_now;
    use tokio::time::{advance, Instant};

    fn remote_controller() -> (QueryController, mpsc::UnboundedReceiver<DropdownEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (QueryController::new(FilterMode::Remote, tx), rx)
    }

    fn expect_filter_request(event: DropdownEvent) -> FilterRequest {
        match event {
            DropdownEvent::FilterRequested(request) => request,
            other => panic!("expected FilterRequested, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_debounce_coalesces_keystrokes() {
        let (mut controller, mut rx) = remote_controller();
        let start = Instant::now();

        controller.on_query_change("f");
        yield_now().await;
        advance(Duration::from_millis(100)).await;

        controller.on_query_change("fo");
        yield_now().await;
        advance(Duration::from_millis(100)).await;

        controller.on_query_change("foo");
        yield_now().await;

        // One request, carrying the latest text, 800ms after the last keystroke
        let request = expect_filter_request(rx.recv().await.unwrap());
        assert_eq!(request.text, "foo");
        assert_eq!(start.elapsed(), Duration::from_millis(1000));

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_quiet_period_must_fully_elapse() {
        let (mut controller, mut rx) = remote_controller();

        controller.on_query_change("a");
        yield_now().await;
        advance(Duration::from_millis(799)).await;
        assert!(rx.try_recv().is_err());

        advance(Duration::from_millis(1)).await;
        let request = expect_filter_request(rx.recv().await.unwrap());
        assert_eq!(request.text, "a");
    }

    #[tokio::test(start_paused = true)]
    async fn test_generations_increase_per_keystroke() {
        let (mut controller, mut rx) = remote_controller();

        controller.on_query_change("a");
        yield_now().await;
        advance(Duration::from_millis(900)).await;
        let first = expect_filter_request(rx.recv().await.unwrap());

        controller.on_query_change("ab");
        yield_now().await;
        advance(Duration::from_millis(900)).await;
        let second = expect_filter_request(rx.recv().await.unwrap());

        assert!(second.generation > first.generation);
        assert_eq!(controller.current_generation(), second.generation);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_makes_pending_timer_a_noop() {
        let (mut controller, mut rx) = remote_controller();

        controller.on_query_change("abc");
        yield_now().await;
        controller.teardown();

        advance(Duration::from_millis(2000)).await;
        yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_cancels_pending_timer() {
        let (mut controller, mut rx) = remote_controller();

        controller.on_query_change("abc");
        yield_now().await;
        controller.reset();
        assert_eq!(controller.text(), "");

        advance(Duration::from_millis(2000)).await;
        yield_now().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_local_mode_never_emits() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut controller = QueryController::new(FilterMode::Local, tx);

        controller.on_query_change("abc");
        assert_eq!(controller.text(), "abc");

        advance(Duration::from_millis(2000)).await;
        yield_now().await;
        assert!(rx.try_recv().is_err());
    }
}
