//! Fixed reply texts and intent keywords.

use concierge_core::ResortProfile;

/// Substrings that request the image menu.
pub const IMAGE_KEYWORDS: &[&str] = &["photo", "photos", "images", "img", "pics", "pictures", "pic"];

/// Substrings that mark a booking inquiry.
pub const BOOKING_KEYWORDS: &[&str] = &[
    "book",
    "booking",
    "reserve",
    "reservation",
    "check-in",
    "check in",
    "checkin",
];

/// Sent when no generated reply could be obtained.
pub const FALLBACK_REPLY: &str = "Our team will contact you as soon as possible.";

/// Sent when a room's image folder cannot be read.
pub const MEDIA_ERROR_REPLY: &str = "Sorry, there was an error loading the images.";

/// Periodic keepalive text.
pub const HEARTBEAT: &str = "👋 Ping to keep the bot alive!";

/// One-time greeting for a new sender.
pub fn greeting(profile: &ResortProfile) -> String {
    format!("🌺 Namasthe from {}! 🌺", profile.name)
}

/// Reply to booking inquiries. Never collects or confirms a booking.
pub fn booking_instructions(profile: &ResortProfile) -> String {
    format!(
        "🌸 Thank you for choosing {}!\n\
         To proceed with your booking, please share the following details:\n\
         👤 Name\n\
         🏡 Preferred Room Type\n\
         📅 Check-in Date\n\
         📅 Check-out Date\n\
         👨‍👩‍👧‍👦 Number of Guests (Adults & Children)\n\
         \n\
         *Please contact us directly at:*\n\
         📞 *Phone*: {}\n\
         📧 *Email*: {}",
        profile.name, profile.phone, profile.email
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_names_resort() {
        let profile = ResortProfile::default();
        assert_eq!(greeting(&profile), "🌺 Namasthe from Chembarathi Wayanad! 🌺");
    }

    #[test]
    fn test_booking_instructions_contact_details() {
        let profile = ResortProfile {
            name: "Hill Nest".to_string(),
            phone: "+91 1".to_string(),
            email: "stay@hillnest.in".to_string(),
        };
        let text = booking_instructions(&profile);

        assert!(text.starts_with("🌸 Thank you for choosing Hill Nest!\n"));
        assert!(text.contains("\n\n*Please contact us directly at:*\n"));
        assert!(text.contains("📞 *Phone*: +91 1"));
        assert!(text.ends_with("📧 *Email*: stay@hillnest.in"));
        assert_eq!(text.lines().count(), 11);
    }
}
