use std::collections::HashMap;

use anyhow::{anyhow, Result};

use crate::hal::traits::TagResolver;
use crate::hal::types::{LayoutTag, SpeakerSet};

/// Tag resolver backed by an in-memory table.
#[derive(Debug, Default)]
pub struct TableTagResolver {
    entries: HashMap<LayoutTag, SpeakerSet>,
}

impl TableTagResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: LayoutTag, bitmap: SpeakerSet) {
        self.entries.insert(tag, bitmap);
    }
}

impl TagResolver for TableTagResolver {
    fn bitmap_for_tag(&self, tag: LayoutTag) -> Result<SpeakerSet> {
        self.entries
            .get(&tag)
            .copied()
            .ok_or_else(|| anyhow!("no bitmap for layout tag {}", tag.0))
    }
}
