/// Pictures shown by the client
///
/// This module handles:
/// - Holding decoded tile images keyed by their URL (ImageStore)
/// - Downscaled previews of a file picked for upload (preview.rs)

pub mod preview;

use iced::widget::image::Handle;
use std::collections::HashMap;

/// Decoded pictures keyed by the URL they were downloaded from
#[derive(Debug, Default)]
pub struct ImageStore {
    handles: HashMap<String, Handle>,
}

impl ImageStore {
    pub fn get(&self, url: &str) -> Option<&Handle> {
        self.handles.get(url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.handles.contains_key(url)
    }

    pub fn insert(&mut self, url: String, bytes: Vec<u8>) {
        self.handles.insert(url, Handle::from_bytes(bytes));
    }
}
