// Copyright 2026 the Cardstock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scoped acquisition of global pointer capture.
//!
//! A resize gesture needs pointer-move and pointer-up events delivered even
//! when the pointer leaves the component's own bounds, so the host attaches a
//! listener pair to its top-level input surface for the duration of the
//! gesture. Those listeners are process-wide: leaking one means a live
//! pointer-up misfires against an unrelated future gesture.
//!
//! [`CaptureGuard`] makes the attach/detach pairing structural. Entering a
//! resize session acquires a guard; dropping the guard releases capture. The
//! release path is therefore reachable from a normal pointer-up, from the
//! editor being closed mid-gesture, and from the session simply being
//! dropped, without any of those call sites naming it.

use std::fmt;
use std::rc::Rc;

/// Host hook that attaches and detaches the global pointer listener pair.
///
/// Implementations must tolerate being called exactly once per direction per
/// gesture; the editor guarantees that pairing via [`CaptureGuard`].
pub trait CaptureHost {
    /// Attach the global pointer-move/pointer-up listeners.
    fn attach(&self);
    /// Detach the listeners attached by the matching [`CaptureHost::attach`].
    fn detach(&self);
}

/// A [`CaptureHost`] that does nothing.
///
/// Useful for headless sessions and tests that do not model an input surface.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopCapture;

impl CaptureHost for NoopCapture {
    fn attach(&self) {}
    fn detach(&self) {}
}

/// Owned handle over an attached listener pair.
///
/// Construction attaches, drop detaches. The guard is deliberately neither
/// cloneable nor re-acquirable so a gesture cannot double-attach.
pub(crate) struct CaptureGuard {
    host: Rc<dyn CaptureHost>,
}

impl CaptureGuard {
    /// Attaches the host's listeners and returns the owning guard.
    pub(crate) fn acquire(host: Rc<dyn CaptureHost>) -> Self {
        host.attach();
        Self { host }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.host.detach();
    }
}

impl fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureGuard").finish_non_exhaustive()
    }
}
