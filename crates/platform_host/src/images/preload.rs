//! Fire-and-forget image preloading.

use std::{cell::RefCell, rc::Rc};

/// Host service that starts fetching an image so a later screen can show it immediately.
///
/// Preloads are never awaited; failures are neither observed nor retried.
pub trait ImagePreloader {
    /// Starts loading `url`.
    fn preload(&self, url: &str);
}

#[derive(Debug, Clone, Copy, Default)]
/// Preloader that ignores every request.
pub struct NoopImagePreloader;

impl ImagePreloader for NoopImagePreloader {
    fn preload(&self, _url: &str) {}
}

#[derive(Debug, Clone, Default)]
/// Preloader that records requested URLs in call order.
pub struct MemoryImagePreloader {
    requested: Rc<RefCell<Vec<String>>>,
}

impl MemoryImagePreloader {
    /// Returns every URL requested so far.
    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

impl ImagePreloader for MemoryImagePreloader {
    fn preload(&self, url: &str) {
        self.requested.borrow_mut().push(url.to_string());
    }
}
