//! Decoding of the search form.

use crate::error::AppError;
use common::{ScrapeRequest, Site, DEFAULT_HOURS_OLD, DEFAULT_RESULTS_WANTED, DEFAULT_SITES};

/// Raw form fields as submitted, kept as text so they can be echoed back
/// into the form even when they fail to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchForm {
    pub search_term: Option<String>,
    pub location: Option<String>,
    pub site_name: Vec<String>,
    pub results_wanted: Option<String>,
    pub hours_old: Option<String>,
    pub country_indeed: Option<String>,
}

impl SearchForm {
    /// Builds the form from decoded key/value pairs. `site_name` may repeat;
    /// for the other keys the last value wins. Unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = SearchForm::default();
        for (key, value) in pairs {
            match key.as_str() {
                "search_term" => form.search_term = Some(value),
                "location" => form.location = Some(value),
                "site_name" => form.site_name.push(value),
                "results_wanted" => form.results_wanted = Some(value),
                "hours_old" => form.hours_old = Some(value),
                "country_indeed" => form.country_indeed = Some(value),
                _ => {}
            }
        }
        form
    }

    /// Sites ticked on the form, or the default set when none are.
    pub fn sites(&self) -> Result<Vec<Site>, AppError> {
        let ticked: Vec<&str> = self
            .site_name
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        if ticked.is_empty() {
            return Ok(DEFAULT_SITES.to_vec());
        }
        ticked
            .into_iter()
            .map(|name| name.parse::<Site>().map_err(AppError::from))
            .collect()
    }

    /// Validates the fields and fills in defaults. Blank optional fields
    /// count as absent.
    pub fn to_request(&self, default_country: &str) -> Result<ScrapeRequest, AppError> {
        let search_term = required(&self.search_term, "search_term")?;
        let location = required(&self.location, "location")?;

        let mut request = ScrapeRequest::new(search_term, location);
        request.site_names = self.sites()?;
        request.results_wanted = number(&self.results_wanted, "results_wanted", DEFAULT_RESULTS_WANTED)?;
        request.hours_old = number(&self.hours_old, "hours_old", DEFAULT_HOURS_OLD)?;
        request.country_indeed = optional(&self.country_indeed)
            .unwrap_or(default_country)
            .to_string();
        Ok(request)
    }
}

fn optional(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str, AppError> {
    optional(value).ok_or(AppError::MissingField(field))
}

fn number<T: std::str::FromStr>(
    value: &Option<String>,
    field: &'static str,
    default: T,
) -> Result<T, AppError> {
    match optional(value) {
        None => Ok(default),
        Some(text) => text.parse().map_err(|_| AppError::InvalidNumber {
            field,
            value: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_are_applied() {
        let form = SearchForm::from_pairs(pairs(&[
            ("search_term", "data engineer"),
            ("location", "Mumbai"),
        ]));
        let request = form.to_request("India").unwrap();

        assert_eq!(request.search_term, "data engineer");
        assert_eq!(request.location, "Mumbai");
        assert_eq!(
            request.site_names,
            vec![Site::Indeed, Site::LinkedIn, Site::Glassdoor]
        );
        assert_eq!(request.results_wanted, 20);
        assert_eq!(request.hours_old, 72);
        assert_eq!(request.country_indeed, "India");
    }

    #[test]
    fn test_explicit_values_and_repeated_sites() {
        let form = SearchForm::from_pairs(pairs(&[
            ("search_term", "rust"),
            ("location", "Berlin"),
            ("site_name", "linkedin"),
            ("site_name", "indeed"),
            ("results_wanted", "5"),
            ("hours_old", "24"),
            ("country_indeed", "Germany"),
            ("csrf", "ignored"),
        ]));
        let request = form.to_request("India").unwrap();

        assert_eq!(request.site_names, vec![Site::LinkedIn, Site::Indeed]);
        assert_eq!(request.results_wanted, 5);
        assert_eq!(request.hours_old, 24);
        assert_eq!(request.country_indeed, "Germany");
    }

    #[test]
    fn test_blank_optional_fields_use_defaults() {
        let form = SearchForm::from_pairs(pairs(&[
            ("search_term", "rust"),
            ("location", "Berlin"),
            ("results_wanted", ""),
            ("hours_old", " "),
            ("country_indeed", ""),
        ]));
        let request = form.to_request("USA").unwrap();
        assert_eq!(request.results_wanted, 20);
        assert_eq!(request.hours_old, 72);
        assert_eq!(request.country_indeed, "USA");
    }

    #[test]
    fn test_missing_required_field() {
        let form = SearchForm::from_pairs(pairs(&[("search_term", "rust"), ("location", "  ")]));
        let err = form.to_request("India").unwrap_err();
        assert!(matches!(err, AppError::MissingField("location")));
    }

    #[test]
    fn test_bad_number() {
        let form = SearchForm::from_pairs(pairs(&[
            ("search_term", "rust"),
            ("location", "Berlin"),
            ("results_wanted", "ten"),
        ]));
        let err = form.to_request("India").unwrap_err();
        assert_eq!(err.to_string(), "results_wanted must be a whole number, got 'ten'");

        let form = SearchForm::from_pairs(pairs(&[
            ("search_term", "rust"),
            ("location", "Berlin"),
            ("hours_old", "-1"),
        ]));
        assert!(form.to_request("India").is_err());
    }

    #[test]
    fn test_unknown_site() {
        let form = SearchForm::from_pairs(pairs(&[
            ("search_term", "rust"),
            ("location", "Berlin"),
            ("site_name", "monster"),
        ]));
        let err = form.to_request("India").unwrap_err();
        assert_eq!(err.to_string(), "invalid site name: monster");
    }
}
