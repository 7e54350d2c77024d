//! Lifecycle of the image-processing runtime backing line detection.
//!
//! The runtime starts `Uninitialized` and becomes `Ready` once its Hough
//! tables are built. Initialisation can run on a background thread while
//! the caller keeps serving frames; detection requested before that point
//! reports no grid instead of blocking.
use crate::hough::{HoughOptions, HoughTransform};
use log::debug;
use serde::Serialize;
use std::sync::{Arc, OnceLock};
use std::thread::JoinHandle;
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RuntimeState {
    Uninitialized,
    Ready,
}

/// Owner of the line-detection backend.
///
/// The state only moves forward (`Uninitialized → Ready`); once ready the
/// runtime is read-only and can be shared across threads.
#[derive(Debug)]
pub struct VisionRuntime {
    options: HoughOptions,
    hough: OnceLock<HoughTransform>,
}

impl VisionRuntime {
    pub fn new(options: HoughOptions) -> Self {
        Self {
            options,
            hough: OnceLock::new(),
        }
    }

    /// Runtime that is initialised before it is returned.
    pub fn ready(options: HoughOptions) -> Self {
        let runtime = Self::new(options);
        runtime.initialize();
        runtime
    }

    /// Builds the backend tables. Idempotent; concurrent callers block until
    /// the first initialisation finishes.
    pub fn initialize(&self) -> &HoughTransform {
        self.hough.get_or_init(|| {
            let start = Instant::now();
            let transform = HoughTransform::new(self.options);
            debug!(
                "VisionRuntime initialised {} angle bins in {:.3} ms",
                self.options.angle_bins(),
                start.elapsed().as_secs_f64() * 1000.0
            );
            transform
        })
    }

    /// Initialises on a background thread.
    pub fn spawn_initialization(runtime: Arc<Self>) -> JoinHandle<()> {
        std::thread::spawn(move || {
            runtime.initialize();
        })
    }

    pub fn state(&self) -> RuntimeState {
        if self.hough.get().is_some() {
            RuntimeState::Ready
        } else {
            RuntimeState::Uninitialized
        }
    }

    pub fn is_ready(&self) -> bool {
        self.state() == RuntimeState::Ready
    }

    /// The line detector, once the runtime is ready.
    pub fn line_detector(&self) -> Option<&HoughTransform> {
        self.hough.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_uninitialized() {
        let rt = VisionRuntime::new(HoughOptions::default());
        assert_eq!(rt.state(), RuntimeState::Uninitialized);
        assert!(rt.line_detector().is_none());
    }

    #[test]
    fn initialize_is_idempotent() {
        let rt = VisionRuntime::new(HoughOptions::default());
        let first = rt.initialize() as *const HoughTransform;
        let second = rt.initialize() as *const HoughTransform;
        assert_eq!(first, second);
        assert!(rt.is_ready());
    }

    #[test]
    fn runtime_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VisionRuntime>();
    }

    #[test]
    fn background_initialization_reaches_ready() {
        let rt = Arc::new(VisionRuntime::new(HoughOptions::default()));
        VisionRuntime::spawn_initialization(Arc::clone(&rt))
            .join()
            .expect("init thread");
        assert_eq!(rt.state(), RuntimeState::Ready);
    }
}
