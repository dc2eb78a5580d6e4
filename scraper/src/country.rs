//! Countries Indeed can be searched in.

use common::ScrapeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    pub name: &'static str,
    aliases: &'static [&'static str],
    indeed_subdomain: &'static str,
    pub currency: &'static str,
}

const COUNTRIES: &[Country] = &[
    Country { name: "India", aliases: &["india", "in"], indeed_subdomain: "in", currency: "INR" },
    Country { name: "USA", aliases: &["usa", "us", "united states"], indeed_subdomain: "www", currency: "USD" },
    Country { name: "UK", aliases: &["uk", "united kingdom", "gb"], indeed_subdomain: "uk", currency: "GBP" },
    Country { name: "Canada", aliases: &["canada", "ca"], indeed_subdomain: "ca", currency: "CAD" },
    Country { name: "Australia", aliases: &["australia", "au"], indeed_subdomain: "au", currency: "AUD" },
    Country { name: "Germany", aliases: &["germany", "de"], indeed_subdomain: "de", currency: "EUR" },
    Country { name: "France", aliases: &["france", "fr"], indeed_subdomain: "fr", currency: "EUR" },
    Country { name: "Netherlands", aliases: &["netherlands", "nl"], indeed_subdomain: "nl", currency: "EUR" },
    Country { name: "Spain", aliases: &["spain", "es"], indeed_subdomain: "es", currency: "EUR" },
    Country { name: "Italy", aliases: &["italy", "it"], indeed_subdomain: "it", currency: "EUR" },
    Country { name: "Ireland", aliases: &["ireland", "ie"], indeed_subdomain: "ie", currency: "EUR" },
    Country { name: "Singapore", aliases: &["singapore", "sg"], indeed_subdomain: "sg", currency: "SGD" },
    Country { name: "Brazil", aliases: &["brazil", "br"], indeed_subdomain: "br", currency: "BRL" },
    Country { name: "Mexico", aliases: &["mexico", "mx"], indeed_subdomain: "mx", currency: "MXN" },
    Country { name: "Japan", aliases: &["japan", "jp"], indeed_subdomain: "jp", currency: "JPY" },
    Country { name: "United Arab Emirates", aliases: &["united arab emirates", "uae", "ae"], indeed_subdomain: "ae", currency: "AED" },
];

impl Country {
    /// Looks a country up by name or two-letter code, ignoring case.
    pub fn from_name(name: &str) -> Result<&'static Country, ScrapeError> {
        let key = name.trim().to_lowercase();
        COUNTRIES
            .iter()
            .find(|country| country.aliases.contains(&key.as_str()))
            .ok_or_else(|| ScrapeError::UnknownCountry(name.to_string()))
    }

    pub fn indeed_base_url(&self) -> String {
        format!("https://{}.indeed.com", self.indeed_subdomain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name_and_code() {
        let india = Country::from_name("India").unwrap();
        assert_eq!(india.indeed_base_url(), "https://in.indeed.com");
        assert_eq!(india.currency, "INR");

        let usa = Country::from_name(" US ").unwrap();
        assert_eq!(usa.indeed_base_url(), "https://www.indeed.com");
    }

    #[test]
    fn test_unknown_country() {
        let err = Country::from_name("Atlantis").unwrap_err();
        assert!(matches!(err, ScrapeError::UnknownCountry(ref c) if c == "Atlantis"));
    }
}
