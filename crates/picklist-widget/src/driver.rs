//! Remote filter driver: wires engine filter requests to a `FilterSource`.
//!
//! The driver consumes the engine's event stream, resolves
//! `FilterRequested` events against the source, and applies responses back
//! to the control. Responses carry the request's generation stamp, so a
//! slow early fetch that resolves after a fast later one is discarded by
//! the engine rather than clobbering it. Everything else on the stream
//! (commits) is forwarded to the host untouched.

use std::sync::Arc;

use parking_lot::Mutex;
use picklist_engine::DropdownEvent;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinHandle;

use crate::adapter::Dropdown;
use crate::source::FilterSource;

/// Background task resolving remote filter requests for one control.
pub struct RemoteFilterDriver {
    handle: JoinHandle<()>,
}

impl RemoteFilterDriver {
    /// Spawn the driver on the current runtime.
    ///
    /// Takes ownership of the engine's event receiver; events the driver
    /// does not consume come back out on the returned channel.
    pub fn spawn(
        dropdown: Arc<Mutex<Dropdown>>,
        source: Arc<dyn FilterSource>,
        mut events: UnboundedReceiver<DropdownEvent>,
    ) -> (Self, UnboundedReceiver<DropdownEvent>) {
        let (host_tx, host_rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                match event {
                    DropdownEvent::FilterRequested(request) => {
                        match source.fetch(request.text.clone()).await {
                            Ok(options) => {
                                let applied = dropdown
                                    .lock()
                                    .apply_filter_response(request.generation, options);
                                if !applied {
                                    tracing::debug!(
                                        generation = request.generation,
                                        text = %request.text,
                                        "superseded filter response dropped"
                                    );
                                }
                            }
                            Err(err) => {
                                tracing::warn!(%err, text = %request.text, "remote filter fetch failed");
                            }
                        }
                    }
                    other => {
                        if host_tx.send(other).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        (Self { handle }, host_rx)
    }

    /// Stop the driver. In-flight fetches are dropped.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for RemoteFilterDriver {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
