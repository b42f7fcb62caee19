use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed pool stickers are drawn from.
pub const STICKER_POOL: [&str; 10] = ["🦁", "🐼", "🐨", "🦊", "🐰", "🦄", "🦕", "🐳", "🚀", "⭐"];

/// An opaque collectible earned by passing a level.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sticker(String);

impl Sticker {
    #[must_use]
    pub fn new(emoji: impl Into<String>) -> Self {
        Self(emoji.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Insertion-ordered sticker collection for the running session.
///
/// Grows by at most one sticker per passed level and never shrinks. Lives
/// in memory only; a full reload starts an empty album.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerAlbum {
    stickers: Vec<Sticker>,
}

impl StickerAlbum {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stickers(&self) -> &[Sticker] {
        &self.stickers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }

    #[must_use]
    pub fn contains(&self, sticker: &Sticker) -> bool {
        self.stickers.contains(sticker)
    }

    /// Pool entries not yet owned, in pool order. Empty once the learner
    /// has collected everything; awards then fall back to duplicates.
    #[must_use]
    pub fn missing_from_pool(&self) -> Vec<&'static str> {
        STICKER_POOL
            .iter()
            .copied()
            .filter(|emoji| !self.stickers.iter().any(|s| s.as_str() == *emoji))
            .collect()
    }

    /// Appends an earned sticker. Duplicates are permitted.
    pub fn add(&mut self, sticker: Sticker) {
        self.stickers.push(sticker);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn album_keeps_insertion_order() {
        let mut album = StickerAlbum::new();
        album.add(Sticker::new("🦁"));
        album.add(Sticker::new("🚀"));
        album.add(Sticker::new("🦁"));

        let owned: Vec<_> = album.stickers().iter().map(Sticker::as_str).collect();
        assert_eq!(owned, vec!["🦁", "🚀", "🦁"]);
        assert_eq!(album.len(), 3);
    }

    #[test]
    fn missing_from_pool_shrinks_as_stickers_arrive() {
        let mut album = StickerAlbum::new();
        assert_eq!(album.missing_from_pool().len(), STICKER_POOL.len());

        album.add(Sticker::new("🦁"));
        let missing = album.missing_from_pool();
        assert_eq!(missing.len(), STICKER_POOL.len() - 1);
        assert!(!missing.contains(&"🦁"));
    }

    #[test]
    fn full_album_has_nothing_missing() {
        let mut album = StickerAlbum::new();
        for emoji in STICKER_POOL {
            album.add(Sticker::new(emoji));
        }
        assert!(album.missing_from_pool().is_empty());
    }
}
