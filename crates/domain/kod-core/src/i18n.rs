//! Site locales and the user-facing message catalog.
//!
//! Turkish is served at the site root and is the default; English lives under
//! the `/en` path segment. Every string the pages show goes through
//! [`Message::text`], so both locales always carry the same set of keys.

use chrono::{Datelike, NaiveDate};
use kod_config::ENGLISH_PREFIX;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Tr,
    En,
}

impl Locale {
    pub const fn as_str(self) -> &'static str {
        match self {
            Locale::Tr => "tr",
            Locale::En => "en",
        }
    }

    /// Resolves the display locale from a URL path: a leading `/en` segment
    /// selects English, anything else Turkish.
    pub fn from_path(path: &str) -> Self {
        match path.strip_prefix(ENGLISH_PREFIX) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => Locale::En,
            _ => Locale::Tr,
        }
    }

    /// Contact submissions carry their language in the referring page URL.
    pub fn from_referer(referer: &str) -> Self {
        if referer.contains("/en/") {
            Locale::En
        } else {
            Locale::Tr
        }
    }

    /// Path prefix for links in this locale: `"/en"` or `""`.
    pub const fn prefix(self) -> &'static str {
        match self {
            Locale::Tr => "",
            Locale::En => ENGLISH_PREFIX,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tr" | "tr-tr" => Some(Locale::Tr),
            "en" | "en-us" | "en-gb" => Some(Locale::En),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Message {
    // Events page
    Loading,
    Error,
    NoResults,
    Total,
    All,
    SearchArtist,
    Artist,
    Genre,
    Year,
    Venue,
    ClearFilters,
    GenreLabel,
    DateLabel,
    VenueLabel,
    SeriesLabel,

    // Upcoming timeline
    TimelineDate,
    TimelineVenue,
    Info,
    Tickets,
    TimelineLoading,
    TimelineError,
    Tba,

    // Contact form
    NameRequired,
    EmailRequired,
    MessageTooShort,
    ContactErrorTitle,
    GoBack,
    MailSubject,
    MessageSent,
    MessageSentBody,
    SendFailed,
    SendFailedBody,
    BackToHome,
}

impl Message {
    pub fn text(self, locale: Locale) -> &'static str {
        use Message::*;
        match locale {
            Locale::Tr => match self {
                Loading => "Yükleniyor...",
                Error => "Etkinlikler yüklenirken hata oluştu",
                NoResults => "Sonuç bulunamadı",
                Total => "Toplam",
                All => "Tümü",
                SearchArtist => "Ara...",
                Artist => "Sanatçı",
                Genre => "Tür",
                Year => "Yıl",
                Venue => "Mekan",
                ClearFilters => "Filtreleri Temizle",
                GenreLabel => "Tür:",
                DateLabel => "Tarih:",
                VenueLabel => "Mekan:",
                SeriesLabel => "Seri:",
                TimelineDate => "Tarih",
                TimelineVenue => "Mekan",
                Info => "Bilgi",
                Tickets => "Bilet",
                TimelineLoading => "Yükleniyor…",
                TimelineError => "Gelecek etkinlikler yüklenemedi",
                Tba => "Duyurulacak",
                NameRequired => "Ad-Soyad gereklidir",
                EmailRequired => "Geçerli e-posta adresi gereklidir",
                MessageTooShort => "Mesaj en az 10 karakter olmalıdır",
                ContactErrorTitle => "Hata",
                GoBack => "Geri dön",
                MailSubject => "KOD Müzik Web Sitesinden Yeni İletişim Mesajı",
                MessageSent => "Mesajınız Başarıyla Gönderildi!",
                MessageSentBody => {
                    "İletişime geçtiğiniz için teşekkür ederiz. En kısa sürede size dönüş yapacağız."
                }
                SendFailed => "Mesaj Gönderilirken Hata",
                SendFailedBody => {
                    "Üzgünüz, mesajınız gönderilirken bir hata oluştu. Lütfen tekrar deneyin veya doğrudan iletisim@kodmuzik.com adresine e-posta gönderin"
                }
                BackToHome => "ANA SAYFAYA DÖN",
            },
            Locale::En => match self {
                Loading => "Loading...",
                Error => "Error loading events",
                NoResults => "No results found",
                Total => "Total",
                All => "All",
                SearchArtist => "Search...",
                Artist => "Artist",
                Genre => "Genre",
                Year => "Year",
                Venue => "Venue",
                ClearFilters => "Clear Filters",
                GenreLabel => "Genre:",
                DateLabel => "Date:",
                VenueLabel => "Venue:",
                SeriesLabel => "Series:",
                TimelineDate => "Date",
                TimelineVenue => "Venue",
                Info => "Info",
                Tickets => "Tickets",
                TimelineLoading => "Loading…",
                TimelineError => "Failed to load future events",
                Tba => "TBA",
                NameRequired => "Name is required",
                EmailRequired => "Valid email is required",
                MessageTooShort => "Message must be at least 10 characters",
                ContactErrorTitle => "Error",
                GoBack => "Go back",
                MailSubject => "New Contact Form Message from KOD Müzik Website",
                MessageSent => "Message Sent Successfully!",
                MessageSentBody => "Thank you for contacting us. We will get back to you soon.",
                SendFailed => "Error Sending Message",
                SendFailedBody => {
                    "Sorry, there was an error sending your message. Please try again or email us directly at iletisim@kodmuzik.com"
                }
                BackToHome => "BACK TO HOME",
            },
        }
    }
}

const MONTHS_TR: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];
const MONTHS_TR_SHORT: [&str; 12] = [
    "Oca", "Şub", "Mar", "Nis", "May", "Haz", "Tem", "Ağu", "Eyl", "Eki", "Kas", "Ara",
];
const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
const MONTHS_EN_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Card date: `5 Eki 2025` / `Oct 5, 2025`.
pub fn format_short_date(date: NaiveDate, locale: Locale) -> String {
    let m = date.month0() as usize;
    match locale {
        Locale::Tr => format!("{} {} {}", date.day(), MONTHS_TR_SHORT[m], date.year()),
        Locale::En => format!("{} {}, {}", MONTHS_EN_SHORT[m], date.day(), date.year()),
    }
}

/// Timeline date: `05 Ekim 2025` / `October 05, 2025`.
pub fn format_long_date(date: NaiveDate, locale: Locale) -> String {
    let m = date.month0() as usize;
    match locale {
        Locale::Tr => format!("{:02} {} {}", date.day(), MONTHS_TR[m], date.year()),
        Locale::En => format!("{} {:02}, {}", MONTHS_EN[m], date.day(), date.year()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_requires_a_whole_path_segment() {
        assert_eq!(Locale::from_path("/en"), Locale::En);
        assert_eq!(Locale::from_path("/en/events"), Locale::En);
        assert_eq!(Locale::from_path("/"), Locale::Tr);
        assert_eq!(Locale::from_path("/etkinlikler"), Locale::Tr);
        assert_eq!(Locale::from_path("/english"), Locale::Tr);
    }

    #[test]
    fn dates_follow_locale_conventions() {
        let d = NaiveDate::from_ymd_opt(2025, 10, 5).unwrap();
        assert_eq!(format_short_date(d, Locale::Tr), "5 Eki 2025");
        assert_eq!(format_short_date(d, Locale::En), "Oct 5, 2025");
        assert_eq!(format_long_date(d, Locale::Tr), "05 Ekim 2025");
        assert_eq!(format_long_date(d, Locale::En), "October 05, 2025");
    }
}
