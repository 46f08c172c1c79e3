//! Room records and the numbered image menu.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rooms offered by default, in menu order.
const DEFAULT_ROOMS: &[&str] = &[
    "deluxe lawn view",
    "premium mountain view",
    "pool villa",
    "deluxe pool forest view",
    "honeymoon suite",
    "premium pool mountain view",
];

/// A bookable room as stored in the rooms table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomOption {
    /// Name shown to guests.
    #[serde(rename = "room_name")]
    pub display_name: String,
    /// Nightly rate in rupees.
    #[serde(deserialize_with = "rate_from_json")]
    pub rate: u64,
    /// Free-text description.
    #[serde(default, deserialize_with = "text_from_json")]
    pub description: String,
    /// Floor area in square feet.
    #[serde(rename = "size", default, deserialize_with = "text_from_json")]
    pub size_sq_ft: String,
    /// Check-in time, as written in the table.
    #[serde(rename = "check_in_time", default, deserialize_with = "text_from_json")]
    pub check_in: String,
    /// Check-out time, as written in the table.
    #[serde(rename = "check_out_time", default, deserialize_with = "text_from_json")]
    pub check_out: String,
}

impl RoomOption {
    /// Directory under the image root holding this room's photos.
    pub fn media_folder_key(&self) -> String {
        folder_key_for(&self.display_name)
    }

    /// Render the room as grounding text.
    pub fn render(&self) -> String {
        format!(
            "🏡 *{}* ({} sq. ft.)\n💸 Rate: *₹{}*\n📝 {}\n🕐 Check-in: {}, Check-out: {}\n",
            self.display_name,
            self.size_sq_ft,
            self.rate,
            self.description,
            self.check_in,
            self.check_out
        )
    }
}

/// Render rooms cheapest first, separated by blank lines.
pub fn render_rooms(rooms: &[RoomOption]) -> String {
    let mut ordered: Vec<&RoomOption> = rooms.iter().collect();
    ordered.sort_by_key(|room| room.rate);
    ordered
        .iter()
        .map(|room| room.render())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Derive a media folder key from a display name.
///
/// Lowercases and collapses every run of non-alphanumeric characters into a
/// single `_`, e.g. `Deluxe Lawn View` becomes `deluxe_lawn_view`.
pub fn folder_key_for(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut pending_sep = false;
    for ch in name.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_sep && !key.is_empty() {
                key.push('_');
            }
            pending_sep = false;
            key.extend(ch.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    key
}

/// One line of the image menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    /// Lowercased room name; what a guest types to select it.
    pub key: String,
    /// Media folder key under the image root.
    pub folder: String,
}

impl CatalogEntry {
    /// Build an entry whose folder is derived from the name.
    pub fn new(name: &str) -> Self {
        Self {
            key: name.trim().to_lowercase(),
            folder: folder_key_for(name),
        }
    }

    /// Build an entry with an explicit folder.
    pub fn with_folder(name: &str, folder: impl Into<String>) -> Self {
        Self {
            key: name.trim().to_lowercase(),
            folder: folder.into(),
        }
    }

    /// The key with its first character uppercased, as shown in the menu.
    pub fn title(&self) -> String {
        let mut chars = self.key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

/// Error parsing a `ROOM_CATALOG` value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogParseError {
    /// An entry had no room name.
    #[error("catalog entry {0} has an empty room name")]
    EmptyName(usize),

    /// Two entries resolve to the same key.
    #[error("room {0:?} appears more than once")]
    Duplicate(String),
}

/// Ordered set of rooms offered in the image menu.
///
/// Positions are 1-based so guests can reply with the number they see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomCatalog {
    entries: Vec<CatalogEntry>,
}

impl Default for RoomCatalog {
    fn default() -> Self {
        Self::from_names(DEFAULT_ROOMS.iter().copied())
    }
}

impl RoomCatalog {
    /// Create a catalog from explicit entries.
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Create a catalog from room names, deriving folder keys.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: names
                .into_iter()
                .map(|name| CatalogEntry::new(name.as_ref()))
                .collect(),
        }
    }

    /// Create a catalog from room records, cheapest first.
    pub fn from_rooms(rooms: &[RoomOption]) -> Self {
        let mut ordered: Vec<&RoomOption> = rooms.iter().collect();
        ordered.sort_by_key(|room| room.rate);
        Self::from_names(ordered.iter().map(|room| room.display_name.as_str()))
    }

    /// Parse `Name=folder;Other Name;...`. A missing folder is derived from the name.
    pub fn parse(spec: &str) -> Result<Self, CatalogParseError> {
        let mut entries: Vec<CatalogEntry> = Vec::new();
        for (idx, raw) in spec.split(';').filter(|s| !s.trim().is_empty()).enumerate() {
            let (name, folder) = match raw.split_once('=') {
                Some((name, folder)) if !folder.trim().is_empty() => {
                    (name.trim(), Some(folder.trim()))
                }
                Some((name, _)) => (name.trim(), None),
                None => (raw.trim(), None),
            };
            if name.is_empty() {
                return Err(CatalogParseError::EmptyName(idx + 1));
            }
            let entry = match folder {
                Some(folder) => CatalogEntry::with_folder(name, folder),
                None => CatalogEntry::new(name),
            };
            if entries.iter().any(|e| e.key == entry.key) {
                return Err(CatalogParseError::Duplicate(entry.key));
            }
            entries.push(entry);
        }
        Ok(Self { entries })
    }

    /// All entries in menu order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at a 1-based menu position.
    pub fn get(&self, position: usize) -> Option<&CatalogEntry> {
        position
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
    }

    /// Resolve a guest's reply to a room.
    ///
    /// A trimmed reply that parses as an integer `k` with `1 <= k <= len`
    /// selects the `k`-th room; anything else is matched against room keys
    /// after lowercasing.
    pub fn resolve(&self, message: &str) -> Option<&CatalogEntry> {
        let trimmed = message.trim();
        let key = match trimmed.parse::<i64>() {
            Ok(k) if k >= 1 && (k as usize) <= self.entries.len() => {
                return self.get(k as usize);
            }
            _ => trimmed.to_lowercase(),
        };
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Render the numbered image menu.
    pub fn render_menu(&self) -> String {
        let mut list = String::from("🖼️ Here are our room options:\n\n");
        for (idx, entry) in self.entries.iter().enumerate() {
            list.push_str(&format!("{}. {}\n", idx + 1, entry.title()));
        }
        list.push_str("\n📸 Please reply with the *room name* or *option number* to view images.");
        list
    }
}

fn rate_from_json<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
            .ok_or_else(|| de::Error::custom(format!("invalid rate {}", n))),
        serde_json::Value::String(s) => s
            .trim()
            .replace(',', "")
            .parse::<f64>()
            .ok()
            .filter(|f| *f >= 0.0)
            .map(|f| f.round() as u64)
            .ok_or_else(|| de::Error::custom(format!("invalid rate {:?}", s))),
        other => Err(de::Error::custom(format!("invalid rate {}", other))),
    }
}

fn text_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        other => Ok(other.to_string()),
    }
}
