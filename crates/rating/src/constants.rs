/// Store page for this application's own listing.
pub const STORE_LISTING_URL: &str =
    "https://play.google.com/store/apps/details?id=com.tasomaniac.openwith";

pub const FEEDBACK_EMAIL: &str = "Said Tahsin Dane <tasomaniac+openlinkwith@gmail.com>";

pub const FEEDBACK_SUBJECT: &str = "Open Link With feedback";

pub const FEEDBACK_MIME_TYPE: &str = "message/rfc822";

/// Key the affordance host registers the rating category under.
pub const AFFORDANCE_KEY: &str = "pref_key_category_ask_for_rating";

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Ratings at or above this go straight to the store.
pub const DEFAULT_GOOD_RATING: u8 = 4;
