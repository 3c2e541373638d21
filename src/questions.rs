//! The fixed survey schema: exact column headers as they appear in the CSV.
//!
//! Headers are matched verbatim (after whitespace trimming in the loader);
//! a missing header is a fatal error in whichever derivation needs it.

pub const TIMESTAMP: &str = "Timestamp";

pub const REGION: &str = "Where do you live? (Region)";
pub const CONNECTION: &str = "What is your main type of internet connection?";
pub const STABILITY: &str =
    "How would you rate the stability of your internet connection in 2025?";
pub const HOURS_NO_INTERNET: &str =
    "On average, how many hours per day do you not have internet connection?";
pub const OUTAGE_FREQUENCY: &str = "How often did you experience power outages in 2025?";
pub const OUTAGE_DURATION: &str = "What was the average duration of outages (hours) in 2025?";
pub const BACKUP_AVAILABLE: &str =
    "Do you have a backup power source (e.g., UPS, generator, solar energy)?";
pub const BACKUP_TYPE: &str = "If yes, what kind of backup power source do you have?";
pub const BACKUP_DURATION: &str = "If yes, how long can it provide power on average per day?";
pub const DEVICES: &str = "What number and type of devices are available to you?";
pub const WORKPLACE: &str = "Do you have a separate workplace at home?";
pub const ACCESSORIES: &str = "Do you have the necessary accessories (webcam, headset)?";
pub const ERGONOMICS: &str =
    "Is your workplace ergonomically equipped (chair, desk, lighting, ventilation)?";
