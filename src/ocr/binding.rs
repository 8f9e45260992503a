//! One-time platform binding
//!
//! [`Binder`] resolves the platform at most once and hands out the cached
//! [`Bindings`] afterwards. [`Binder::reload`] redoes the work, which is
//! only useful when the host runtime changed underneath the process.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use super::error::OcrError;
use super::platform::{Bindings, Platform};

/// Bind-once guard around a platform
pub struct Binder<P> {
    platform: P,
    state: Mutex<Option<Arc<Bindings>>>,
    binds: AtomicU64,
}

impl<P: Platform> Binder<P> {
    /// Create an unbound binder
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            state: Mutex::new(None),
            binds: AtomicU64::new(0),
        }
    }

    /// The wrapped platform
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Bind if this has not happened yet, otherwise return the cached bindings
    pub fn ensure(&self) -> Result<Arc<Bindings>, OcrError> {
        let mut state = self.state.lock();
        if let Some(bindings) = state.as_ref() {
            debug!(generation = bindings.generation, "Platform already bound");
            return Ok(Arc::clone(bindings));
        }
        self.bind_locked(&mut state)
    }

    /// Bind again even if already bound
    pub fn reload(&self) -> Result<Arc<Bindings>, OcrError> {
        let mut state = self.state.lock();
        info!("Reloading platform bindings");
        self.bind_locked(&mut state)
    }

    /// [`Binder::reload`] when `reload` is set, [`Binder::ensure`] otherwise
    pub fn bind(&self, reload: bool) -> Result<Arc<Bindings>, OcrError> {
        if reload {
            self.reload()
        } else {
            self.ensure()
        }
    }

    /// Whether bindings are cached
    pub fn is_bound(&self) -> bool {
        self.state.lock().is_some()
    }

    /// Number of successful platform binds so far
    pub fn bind_count(&self) -> u64 {
        self.binds.load(Ordering::Acquire)
    }

    fn bind_locked(&self, state: &mut Option<Arc<Bindings>>) -> Result<Arc<Bindings>, OcrError> {
        let mut bindings = self.platform.bind()?;
        bindings.generation = self.binds.fetch_add(1, Ordering::AcqRel) + 1;

        info!(
            generation = bindings.generation,
            languages = bindings.recognizer_languages.len(),
            formats = bindings.file_extensions.len(),
            "Platform bound"
        );

        let bindings = Arc::new(bindings);
        *state = Some(Arc::clone(&bindings));
        Ok(bindings)
    }
}
