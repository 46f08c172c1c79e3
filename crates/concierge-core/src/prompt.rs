//! Prompt assembly and fingerprinting.

use sha2::{Digest, Sha256};

use crate::history::ConversationTurn;
use crate::profile::ResortProfile;

/// Compute a stable SHA-256 fingerprint for a prompt string.
pub fn hash_prompt(prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prompt.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}

/// Render history as `User:` / `Assistant:` lines, oldest first.
pub fn render_history(turns: &[ConversationTurn]) -> String {
    turns
        .iter()
        .map(|turn| format!("{}: {}", turn.role.label(), turn.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The fixed parts of every generation prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    /// Role instruction that opens the prompt.
    pub persona: String,
    /// Formatting and behaviour rules, one per line.
    pub guidelines: Vec<String>,
}

impl PromptTemplate {
    /// The concierge template for a resort.
    pub fn for_resort(profile: &ResortProfile) -> Self {
        let persona = format!(
            "You are a helpful and polite assistant for a boutique resort called {}.",
            profile.name
        );
        let guidelines = [
            "Be friendly, informative, and under 40 words.",
            "Use emojis and formatting (*bold*, _italics_) to improve readability.",
            "Prices must be in *bold* (e.g., ₹8,500).",
            "Even if rooms have same rates, treat them as separate and list them all.",
            "Need only * instead **",
            "Don't send various cottages and villas starting from ₹8000.",
            "dont send room details in each message, only send them if asked",
            "Include Emoji",
            "Maintain conversation context and refer to previous messages when relevant",
            "NEVER provide booking assistance or accept bookings",
            "If user asks about booking, direct them to contact via phone or email",
            "Do not share the booking form or booking details",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        Self {
            persona,
            guidelines,
        }
    }

    /// Fingerprint of the fixed instructions, for logging prompt revisions.
    pub fn fingerprint(&self) -> String {
        let mut fixed = self.persona.clone();
        for line in &self.guidelines {
            fixed.push('\n');
            fixed.push_str(line);
        }
        hash_prompt(&fixed)
    }

    /// Assemble the full prompt.
    pub fn assemble(&self, context: &str, history: &str, user_message: &str) -> String {
        let guidelines = self
            .guidelines
            .iter()
            .map(|line| format!("- {}", line))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{}\n\nRoom Details:\n{}\n\nPrevious conversation:\n{}\n\nUser asked:\n{}\n\nGuidelines for reply:\n{}",
            self.persona, context, history, user_message, guidelines
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_prompt_stable() {
        let first = hash_prompt("test prompt");
        let second = hash_prompt("test prompt");
        let different = hash_prompt("another prompt");

        assert_eq!(first, second);
        assert_ne!(first, different);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn test_render_history() {
        let turns = vec![
            ConversationTurn::user("do you have a pool?"),
            ConversationTurn::assistant("Yes! 🏊"),
        ];
        assert_eq!(
            render_history(&turns),
            "User: do you have a pool?\nAssistant: Yes! 🏊"
        );
        assert_eq!(render_history(&[]), "");
    }

    #[test]
    fn test_assemble_sections_in_order() {
        let template = PromptTemplate::for_resort(&ResortProfile::default());
        let prompt = template.assemble("ROOMS", "User: hi", "is breakfast included?");

        assert!(prompt.starts_with(
            "You are a helpful and polite assistant for a boutique resort called Chembarathi Wayanad."
        ));
        let rooms = prompt.find("Room Details:\nROOMS").unwrap();
        let history = prompt.find("Previous conversation:\nUser: hi").unwrap();
        let asked = prompt.find("User asked:\nis breakfast included?").unwrap();
        let rules = prompt.find("Guidelines for reply:\n- Be friendly").unwrap();
        assert!(rooms < history && history < asked && asked < rules);
        assert!(prompt.contains("- NEVER provide booking assistance or accept bookings"));
    }

    #[test]
    fn test_fingerprint_tracks_resort() {
        let a = PromptTemplate::for_resort(&ResortProfile::default());
        let b = PromptTemplate::for_resort(&ResortProfile {
            name: "Other Resort".to_string(),
            ..ResortProfile::default()
        });
        assert_eq!(a.fingerprint(), a.clone().fingerprint());
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
