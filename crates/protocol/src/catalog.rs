//! Emoji catalog types for the admin endpoints.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::EMOJI_MIME;
use crate::image_ref::data_url_from_base64;
use crate::types::Emotion;

/// Raw `GET /admin/emotions` body: label -> ordered entries.
pub type WireCatalog = HashMap<String, Vec<WireEmoji>>;

/// One catalog entry as it appears on the wire.
///
/// Older service builds list the stored file path instead of an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireEmoji {
    Asset { name: String, base64: String },
    Path(String),
}

/// An emoji image attached to one emotion, identified by `(emotion, name)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiAsset {
    pub emotion: Emotion,
    pub name: String,
    /// Base64 image payload. Empty when the service only listed a path.
    pub image_base64: String,
}

impl EmojiAsset {
    /// Displayable `data:` URL, or `None` if the service sent no payload.
    pub fn data_url(&self) -> Option<String> {
        (!self.image_base64.is_empty())
            .then(|| data_url_from_base64(EMOJI_MIME, &self.image_base64))
    }
}

/// Emoji assets grouped by emotion, iterated in canonical label order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmojiCatalog {
    entries: BTreeMap<Emotion, Vec<EmojiAsset>>,
}

impl EmojiCatalog {
    /// Builds a catalog from the wire body. Unknown labels are skipped.
    pub fn from_wire(wire: WireCatalog) -> Self {
        let mut entries = BTreeMap::new();
        for (label, items) in wire {
            let Ok(emotion) = label.parse::<Emotion>() else {
                warn!(label = %label, "skipping unknown emotion label in catalog");
                continue;
            };
            let assets = items
                .into_iter()
                .map(|item| match item {
                    WireEmoji::Asset { name, base64 } => EmojiAsset {
                        emotion,
                        name,
                        image_base64: base64,
                    },
                    WireEmoji::Path(path) => EmojiAsset {
                        emotion,
                        name: file_name(&path).to_string(),
                        image_base64: String::new(),
                    },
                })
                .collect();
            entries.insert(emotion, assets);
        }
        Self { entries }
    }

    /// Serializes back to the `{ name, base64 }` wire form.
    pub fn to_wire(&self) -> WireCatalog {
        self.entries
            .iter()
            .map(|(emotion, assets)| {
                let items = assets
                    .iter()
                    .map(|a| WireEmoji::Asset {
                        name: a.name.clone(),
                        base64: a.image_base64.clone(),
                    })
                    .collect();
                (emotion.as_str().to_string(), items)
            })
            .collect()
    }

    /// Assets for `emotion`, empty if none are listed.
    pub fn get(&self, emotion: Emotion) -> &[EmojiAsset] {
        self.entries.get(&emotion).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether an asset named `name` is listed under `emotion`.
    pub fn contains(&self, emotion: Emotion, name: &str) -> bool {
        self.get(emotion).iter().any(|a| a.name == name)
    }

    /// Listed emotions and their assets, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, &[EmojiAsset])> {
        self.entries.iter().map(|(e, a)| (*e, a.as_slice()))
    }

    /// Total number of assets across all emotions.
    pub fn asset_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.asset_count() == 0
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
