//! Turn classification and dispatch.
//!
//! Each inbound message produces exactly one action. Classifiers run in a
//! fixed priority order and the first match wins:
//!
//! 1. image keywords → numbered room menu
//! 2. room number or name → that room's photos
//! 3. booking keywords → fixed booking instructions
//! 4. anything else → grounded generated reply
//!
//! The first message from a sender is additionally preceded by a one-time
//! greeting; classification still runs on that same message.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use concierge_core::{
    AuditEntry, AuditTrail, CatalogEntry, ConversationStore, InboundMessage, MessageSender,
    ReplyKind, ResortProfile, RoomCatalog, SendError,
};
use tracing::{debug, info, warn};

use crate::replies::{
    booking_instructions, greeting, BOOKING_KEYWORDS, IMAGE_KEYWORDS, MEDIA_ERROR_REPLY,
};
use crate::responder::ResponseGenerator;

/// Default root of the room image folders.
pub const DEFAULT_IMAGES_DIR: &str = "images";

/// What a message is asking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ImageMenu,
    RoomImages(CatalogEntry),
    Booking,
    General,
}

type Classifier = fn(&RoomCatalog, &str) -> Option<Intent>;

/// Classifiers in priority order.
const CLASSIFIERS: &[Classifier] = &[image_menu, room_selection, booking];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lowered = text.trim().to_lowercase();
    keywords.iter().any(|keyword| lowered.contains(keyword))
}

fn image_menu(_: &RoomCatalog, text: &str) -> Option<Intent> {
    contains_any(text, IMAGE_KEYWORDS).then_some(Intent::ImageMenu)
}

fn room_selection(catalog: &RoomCatalog, text: &str) -> Option<Intent> {
    catalog.resolve(text).cloned().map(Intent::RoomImages)
}

fn booking(_: &RoomCatalog, text: &str) -> Option<Intent> {
    contains_any(text, BOOKING_KEYWORDS).then_some(Intent::Booking)
}

/// Classify a message body.
///
/// Keyword matching is a case-insensitive substring test, so `"epic view"`
/// asks for the image menu.
pub fn classify(catalog: &RoomCatalog, text: &str) -> Intent {
    CLASSIFIERS
        .iter()
        .find_map(|classifier| classifier(catalog, text))
        .unwrap_or(Intent::General)
}

/// What the router did with a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnAction {
    /// Sent the numbered room menu.
    ImageMenu,
    /// Sent a room's photos.
    RoomImages { folder: String, delivered: usize },
    /// The room's folder could not be read; sent the error text.
    MediaUnavailable { folder: String },
    /// Sent the booking instructions.
    Booking,
    /// Sent a generated (or fallback) reply.
    Generated { kind: ReplyKind, attempts: u32 },
}

/// Result of handling one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Whether this message triggered the one-time greeting.
    pub greeted: bool,
    /// The terminal action taken.
    pub action: TurnAction,
}

/// Routes inbound messages to handlers and sends the replies.
pub struct TurnRouter {
    catalog: RoomCatalog,
    images_dir: PathBuf,
    profile: ResortProfile,
    store: Arc<ConversationStore>,
    responder: ResponseGenerator,
    sender: Arc<dyn MessageSender>,
    audit: Arc<dyn AuditTrail>,
}

impl TurnRouter {
    /// Create a router with the default catalog, image root and profile.
    pub fn new(
        responder: ResponseGenerator,
        sender: Arc<dyn MessageSender>,
        audit: Arc<dyn AuditTrail>,
    ) -> Self {
        Self {
            catalog: RoomCatalog::default(),
            images_dir: PathBuf::from(DEFAULT_IMAGES_DIR),
            profile: ResortProfile::default(),
            store: Arc::clone(responder.store()),
            responder,
            sender,
            audit,
        }
    }

    /// Use a different room catalog.
    pub fn with_catalog(mut self, catalog: RoomCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Use a different image root.
    pub fn with_images_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.images_dir = dir.into();
        self
    }

    /// Use a different resort profile for fixed replies.
    pub fn with_profile(mut self, profile: ResortProfile) -> Self {
        self.profile = profile;
        self
    }

    /// The room catalog.
    pub fn catalog(&self) -> &RoomCatalog {
        &self.catalog
    }

    /// The conversation store.
    pub fn store(&self) -> &Arc<ConversationStore> {
        &self.store
    }

    /// Handle one inbound message.
    ///
    /// Returns an error only when the turn's terminal reply could not be
    /// sent. Audit failures and greeting send failures are logged.
    pub async fn handle(&self, message: &InboundMessage) -> Result<TurnOutcome, SendError> {
        let peer = message.sender.as_str();
        info!("Message from {}: {}", peer, message.text);

        self.record(AuditEntry::Inbound {
            sender: peer.to_string(),
            text: message.text.clone(),
        })
        .await;

        let greeted = self.store.mark_greeted(peer).await;
        if greeted {
            let text = greeting(&self.profile);
            match self.sender.send_text(peer, &text).await {
                Ok(()) => self.record_reply(ReplyKind::Greeting, text).await,
                Err(e) => {
                    warn!("Failed to greet {}: {}", peer, e);
                    self.store.clear_greeted(peer).await;
                }
            }
        }

        let intent = classify(&self.catalog, &message.text);
        debug!("Classified message from {} as {:?}", peer, intent);

        let action = match intent {
            Intent::ImageMenu => {
                let menu = self.catalog.render_menu();
                self.sender.send_text(peer, &menu).await?;
                self.record_reply(ReplyKind::ImageMenu, menu).await;
                TurnAction::ImageMenu
            }
            Intent::RoomImages(entry) => self.send_room_images(peer, &entry).await?,
            Intent::Booking => {
                let text = booking_instructions(&self.profile);
                self.store
                    .append_exchange(peer, &message.text, &text)
                    .await;
                self.sender.send_text(peer, &text).await?;
                self.record_reply(ReplyKind::Booking, text).await;
                TurnAction::Booking
            }
            Intent::General => {
                let generated = self.responder.generate(peer, &message.text).await;
                self.sender.send_text(peer, &generated.text).await?;
                let action = TurnAction::Generated {
                    kind: generated.kind,
                    attempts: generated.attempts,
                };
                self.record_reply(generated.kind, generated.text).await;
                action
            }
        };

        Ok(TurnOutcome { greeted, action })
    }

    async fn send_room_images(
        &self,
        peer: &str,
        entry: &CatalogEntry,
    ) -> Result<TurnAction, SendError> {
        let folder = self.images_dir.join(&entry.folder);

        let files = match list_media(&folder).await {
            Ok(files) => files,
            Err(e) => {
                warn!("Error reading images in {}: {}", folder.display(), e);
                self.sender.send_text(peer, MEDIA_ERROR_REPLY).await?;
                return Ok(TurnAction::MediaUnavailable {
                    folder: entry.folder.clone(),
                });
            }
        };

        let mut delivered = 0;
        for path in files {
            match self.sender.send_media(peer, &path).await {
                Ok(()) => {
                    delivered += 1;
                    self.record(AuditEntry::ImageSent { path }).await;
                }
                Err(e) => warn!("Failed to send {} to {}: {}", path.display(), peer, e),
            }
        }

        info!("Sent {} image(s) of {} to {}", delivered, entry.key, peer);
        Ok(TurnAction::RoomImages {
            folder: entry.folder.clone(),
            delivered,
        })
    }

    async fn record_reply(&self, kind: ReplyKind, text: String) {
        self.record(AuditEntry::Reply { kind, text }).await;
    }

    async fn record(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.record(entry).await {
            warn!("Audit trail write failed: {}", e);
        }
    }
}

/// Regular files directly under `folder`, ordered by file name.
async fn list_media(folder: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(folder).await?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_keywords_win() {
        let catalog = RoomCatalog::default();
        assert_eq!(classify(&catalog, "Send PHOTOS please"), Intent::ImageMenu);
        assert_eq!(classify(&catalog, "pics of booking"), Intent::ImageMenu);
        // Substring semantics: "epic" contains "pic".
        assert_eq!(classify(&catalog, "epic view?"), Intent::ImageMenu);
    }

    #[test]
    fn test_room_by_number_and_name() {
        let catalog = RoomCatalog::default();
        match classify(&catalog, " 3 ") {
            Intent::RoomImages(entry) => assert_eq!(entry.folder, "pool_villa"),
            other => panic!("unexpected {:?}", other),
        }
        match classify(&catalog, "Honeymoon Suite") {
            Intent::RoomImages(entry) => assert_eq!(entry.folder, "honeymoon_suite"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_number_is_general() {
        let catalog = RoomCatalog::default();
        assert_eq!(classify(&catalog, "0"), Intent::General);
        assert_eq!(classify(&catalog, "7"), Intent::General);
        assert_eq!(classify(&catalog, ""), Intent::General);
    }

    #[test]
    fn test_booking_keywords() {
        let catalog = RoomCatalog::default();
        assert_eq!(classify(&catalog, "Can I reserve?"), Intent::Booking);
        assert_eq!(classify(&catalog, "what time is CHECK IN"), Intent::Booking);
        assert_eq!(classify(&catalog, "Is breakfast included?"), Intent::General);
    }

    #[tokio::test]
    async fn test_list_media_sorted_files_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.jpg"), b"b").unwrap();
        std::fs::write(dir.path().join("a.jpg"), b"a").unwrap();
        std::fs::create_dir(dir.path().join("thumbs")).unwrap();

        let files = list_media(dir.path()).await.unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg"]);
    }

    #[tokio::test]
    async fn test_list_media_missing_folder() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_media(&dir.path().join("nope")).await.is_err());
    }
}
