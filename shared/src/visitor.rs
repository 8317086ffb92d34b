use chrono::{DateTime, FixedOffset, Timelike};

/// Key the id is kept under in session storage
pub const VISITOR_ID_KEY: &str = "visitor_unique_id";

const VISITOR_ID_PREFIX: &str = "Авокадик";

const MOBILE_MARKERS: [&str; 8] = [
    "mobile",
    "android",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Desktop,
    Mobile,
}

impl DeviceKind {
    pub fn from_user_agent(user_agent: &str) -> Self {
        let user_agent = user_agent.to_lowercase();
        if MOBILE_MARKERS.iter().any(|marker| user_agent.contains(marker)) {
            DeviceKind::Mobile
        } else {
            DeviceKind::Desktop
        }
    }

    pub fn letter(&self) -> char {
        match self {
            DeviceKind::Desktop => 'D',
            DeviceKind::Mobile => 'M',
        }
    }
}

/// Session id in the form `Авокадик-HH:MM:SS:D`, built from the local
/// business time of the first visit
pub fn generate_visitor_id(now: DateTime<FixedOffset>, device: DeviceKind) -> String {
    format!(
        "{}-{:02}:{:02}:{:02}:{}",
        VISITOR_ID_PREFIX,
        now.hour(),
        now.minute(),
        now.second(),
        device.letter()
    )
}
