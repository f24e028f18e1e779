// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Device-readiness monitor.
//!
//! Polls the backing device and publishes the result in the shared
//! [`DeviceStatus`](mdj_core::state::DeviceStatus). The flusher gates on
//! that flag, so an absent device parks the async path instead of feeding
//! it errors. The monitor is best-effort: it exits on its own once
//! shutdown is flagged and is never joined.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use mdj_core::clock::Clock;
use mdj_storage::device;
use tracing::{info, warn};

use crate::journal::Shared;

const READY_POLL: Duration = Duration::from_secs(1);
const NOT_READY_POLL: Duration = Duration::from_millis(100);

pub(crate) fn run<C: Clock>(shared: Arc<Shared<C>>) {
    loop {
        if shared.queue.is_shutdown() {
            break;
        }

        let ready = device::probe(&shared.config.device_path);
        let was_ready = shared.status.set_ready(ready);
        if ready && !was_ready {
            info!(
                device = %shared.config.device_path.display(),
                "journal device ready"
            );
            // Unblock a flusher parked on the queue condition.
            shared.queue.notify();
        }
        if !ready && was_ready {
            warn!(
                device = %shared.config.device_path.display(),
                "journal device went away"
            );
        }

        thread::sleep(if ready { READY_POLL } else { NOT_READY_POLL });
    }
}
