//! Observation hooks for patch resolution.

use camino::Utf8Path;
use tracing::debug;

/// Receives notifications about how a base document was patched.
///
/// Implementations must be cheap and infallible; they run inline while the
/// patched content is assembled. Both methods default to doing nothing.
pub trait PatchObserver: Send + Sync {
    /// A patch file was found, parsed, and merged over `base`.
    fn patch_applied(&self, base: &Utf8Path, patch: &Utf8Path) {
        let _ = (base, patch);
    }

    /// No patch file exists for `base`; the base is used alone.
    fn patch_absent(&self, base: &Utf8Path, patch: &Utf8Path) {
        let _ = (base, patch);
    }
}

/// Observer that reports patch activity as `tracing` debug events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl PatchObserver for TracingObserver {
    fn patch_applied(&self, base: &Utf8Path, patch: &Utf8Path) {
        debug!(base = %base, patch = %patch, "applied patch");
    }

    fn patch_absent(&self, base: &Utf8Path, patch: &Utf8Path) {
        debug!(base = %base, patch = %patch, "no patch found");
    }
}

/// Observer that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentObserver;

impl PatchObserver for SilentObserver {}
