//! Canned replies used while the chat service is unreachable.

use chrono::Utc;
use galleria_core::ChatExchange;

/// What an offline reply should talk about, chosen from message keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyTopic {
    Gallery,
    Upload,
    Search,
    Help,
    General,
}

/// Keyword rules in priority order; the first rule with a match wins.
const RULES: [(ReplyTopic, &[&str]); 4] = [
    (ReplyTopic::Gallery, &["gallery", "image", "photo"]),
    (ReplyTopic::Upload, &["upload", "add", "new"]),
    (ReplyTopic::Search, &["search", "find", "look"]),
    (ReplyTopic::Help, &["help", "how", "what"]),
];

impl ReplyTopic {
    /// Pick the topic for a message. Matching is case-insensitive substring
    /// matching, so "photos" and "whatever" both match.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
            .map_or(Self::General, |(topic, _)| *topic)
    }

    /// The canned text for this topic.
    pub fn text(self) -> &'static str {
        match self {
            Self::Gallery => {
                "I can help you with your gallery! You can view images, upload new ones, and \
                 search through your collection. The gallery is currently in offline mode, but \
                 you can still browse the sample images."
            }
            Self::Upload => {
                "To upload images, go to the Upload tab and select an image from your device. \
                 You can add a title and description. Note: Uploads are currently in offline mode."
            }
            Self::Search => {
                "You can search through your images using the search box in the Gallery tab. \
                 Try searching by title or description. The search works on the sample images \
                 in offline mode."
            }
            Self::Help => {
                "I'm your gallery assistant! I can help you with:\n\
                 \u{2022} Viewing and managing your images\n\
                 \u{2022} Uploading new photos\n\
                 \u{2022} Searching through your collection\n\
                 \u{2022} General gallery questions\n\n\
                 I'm currently in offline mode, but I can still provide basic assistance."
            }
            Self::General => {
                "I'm currently offline, but I can still help you with basic gallery questions. \
                 Try asking about viewing images, uploading photos, or searching your \
                 collection. When I'm back online, I'll have access to more advanced features!"
            }
        }
    }
}

/// The reply served for `message` while the chat service is unreachable.
///
/// Always has non-empty content, `offline = true`, and the current time.
pub fn offline_reply(message: &str) -> ChatExchange {
    ChatExchange::offline(ReplyTopic::classify(message).text(), Utc::now())
}
