//! Fixed facts about the clinic shown across the site.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

pub const NAME: &str = "Pareena Eye Care Center";
pub const SHORT_NAME: &str = "Pareena Eye Care";
pub const TAGLINE: &str = "Your vision, our priority";

pub const PHONE_DISPLAY: &str = "+91 99630 06059";
pub const PHONE_TEL: &str = "tel:+919963006059";
pub const EMAIL: &str = "pareenaeyecare@gmail.com";
pub const EMAIL_MAILTO: &str = "mailto:pareenaeyecare@gmail.com";
pub const WHATSAPP_URL: &str = "https://wa.me/919963006059";

pub const ADDRESS_LINES: [&str; 4] = [
    "Shop no 1, #8-3-903/3, Omega Apartments",
    "Nagarjuna Nagar, Ameerpet",
    "Hyderabad, Telangana",
    "500073",
];

pub const MAPS_EMBED_URL: &str = "https://www.google.com/maps/embed?pb=!1m18!1m12!1m3!1d951.6446662831966!2d78.44544452852834!3d17.43199629896212!2m3!1f0!2f0!3f0!3m2!1i1024!2i768!4f13.1!3m3!1m2!1s0x3bcb90ceaf7b6e4b%3A0x8b531265a8506a69!2sPareena%20Eye%20Care%20Center!5e0!3m2!1sen!2sin!4v1749571843788!5m2!1sen!2sin";

/// Opening hours, one row per day range.
pub const HOURS: [(&str, &str); 2] = [
    ("Monday - Saturday", "9:00 AM - 9:00 PM"),
    ("Sunday", "10:00 AM - 6:00 PM"),
];

/// India Standard Time, UTC+05:30.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// The calendar date at the clinic at `now`.
#[must_use]
pub fn local_today(now: DateTime<Utc>) -> NaiveDate {
    FixedOffset::east_opt(IST_OFFSET_SECS)
        .map_or_else(|| now.date_naive(), |ist| now.with_timezone(&ist).date_naive())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_local_today_crosses_midnight_before_utc() {
        let evening_utc = Utc.with_ymd_and_hms(2026, 10, 16, 18, 45, 0).unwrap();
        assert_eq!(local_today(evening_utc), NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());

        let morning_utc = Utc.with_ymd_and_hms(2026, 10, 16, 18, 15, 0).unwrap();
        assert_eq!(local_today(morning_utc), NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
    }

    #[test]
    fn test_links_agree() {
        assert!(PHONE_TEL.ends_with(&PHONE_DISPLAY.replace(' ', "")));
        assert!(EMAIL_MAILTO.ends_with(EMAIL));
    }
}
