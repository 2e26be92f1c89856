//! `Image()`-backed preloader.

use platform_host::ImagePreloader;

#[derive(Debug, Clone, Copy, Default)]
/// Browser preloader that assigns the URL to a detached `Image` element.
pub struct WebImagePreloader;

impl ImagePreloader for WebImagePreloader {
    fn preload(&self, url: &str) {
        crate::bridge::preload_image(url);
    }
}
