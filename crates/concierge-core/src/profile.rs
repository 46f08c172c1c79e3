//! Resort identity used in prompts and fixed replies.

use std::env;

/// Who the bot speaks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResortProfile {
    /// Resort name as shown to guests.
    pub name: String,
    /// Reservations phone number.
    pub phone: String,
    /// Reservations email address.
    pub email: String,
}

impl Default for ResortProfile {
    fn default() -> Self {
        Self {
            name: "Chembarathi Wayanad".to_string(),
            phone: "+91 85478 38091".to_string(),
            email: "info@chembarathiwayanad.com".to_string(),
        }
    }
}

impl ResortProfile {
    /// Load from `RESORT_NAME`, `RESORT_PHONE` and `RESORT_EMAIL`, falling
    /// back to the defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            name: env::var("RESORT_NAME").unwrap_or(defaults.name),
            phone: env::var("RESORT_PHONE").unwrap_or(defaults.phone),
            email: env::var("RESORT_EMAIL").unwrap_or(defaults.email),
        }
    }
}
