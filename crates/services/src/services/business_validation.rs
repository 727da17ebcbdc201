//! Field-level checks on submitted business data.

use db::models::business::BusinessData;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use url::Url;

use super::catalog::find_category;

static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").unwrap());
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@.]+(?:\.[^\s@.]+)+$").unwrap());

const MAX_IMAGES: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, TS)]
pub struct FieldError {
    /// Dotted path of the offending field, e.g. `hours.monday.openTime`
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Check every field and return all problems, in field order. An empty list
/// means the data is acceptable.
pub fn validate_business_data(business: &BusinessData) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if business.name.chars().count() < 2 {
        errors.push(FieldError::new("name", "Business name must be at least 2 characters"));
    }
    if business.category.is_empty() {
        errors.push(FieldError::new("category", "Please select a business category"));
    } else if find_category(&business.category).is_none() {
        errors.push(FieldError::new("category", "Unknown business category"));
    }
    if business.description.chars().count() < 10 {
        errors.push(FieldError::new(
            "description",
            "Description must be at least 10 characters",
        ));
    }
    if !PHONE.is_match(&business.phone) {
        errors.push(FieldError::new("phone", "Invalid phone number format"));
    }
    if !EMAIL.is_match(&business.email) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }
    if business.address.chars().count() < 10 {
        errors.push(FieldError::new("address", "Address must be at least 10 characters"));
    }
    if let Some(website) = business.website.as_deref().filter(|w| !w.is_empty()) {
        if !is_web_url(website) {
            errors.push(FieldError::new("website", "Invalid website URL"));
        }
    }

    for (day, hours) in business.hours.days() {
        if hours.is_open && (hours.open_time.is_none() || hours.close_time.is_none()) {
            errors.push(FieldError::new(
                format!("hours.{}.openTime", day.to_lowercase()),
                "Open and close times are required when business is open",
            ));
        }
    }

    if business.images.len() > MAX_IMAGES {
        errors.push(FieldError::new("images", "Maximum 5 images allowed"));
    }
    if business.sections.is_empty() {
        errors.push(FieldError::new("sections", "Select at least one section"));
    }

    errors
}

fn is_web_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use db::models::business::{BusinessHours, DayHours};

    use super::*;

    fn valid_business() -> BusinessData {
        BusinessData {
            name: "Joe's Diner".into(),
            category: "restaurant".into(),
            description: "Pancakes and coffee since 1962".into(),
            phone: "+15551234567".into(),
            email: "joe@diner.test".into(),
            address: "12 Main Street, Springfield".into(),
            website: Some("https://joesdiner.test".into()),
            hours: BusinessHours::uniform(DayHours::open("07:00", "15:00")),
            images: vec![],
            sections: vec!["hero".into()],
        }
    }

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn valid_data_has_no_errors() {
        assert!(validate_business_data(&valid_business()).is_empty());
    }

    #[test]
    fn empty_website_is_allowed() {
        let mut business = valid_business();
        business.website = Some(String::new());
        assert!(validate_business_data(&business).is_empty());
        business.website = None;
        assert!(validate_business_data(&business).is_empty());
    }

    #[test]
    fn reports_every_bad_field_in_order() {
        let business = BusinessData {
            name: "J".into(),
            category: String::new(),
            description: "short".into(),
            phone: "0123".into(),
            email: "not-an-email".into(),
            address: "nowhere".into(),
            website: Some("ftp://files.test".into()),
            hours: BusinessHours::uniform(DayHours::closed()),
            images: vec!["a".into(); 6],
            sections: vec![],
        };
        assert_eq!(
            fields(&validate_business_data(&business)),
            [
                "name",
                "category",
                "description",
                "phone",
                "email",
                "address",
                "website",
                "images",
                "sections"
            ]
        );
    }

    #[test]
    fn open_day_needs_both_times() {
        let mut business = valid_business();
        business.hours.tuesday = DayHours {
            is_open: true,
            open_time: Some("09:00".into()),
            close_time: None,
        };
        let errors = validate_business_data(&business);
        assert_eq!(fields(&errors), ["hours.tuesday.openTime"]);
    }

    #[test]
    fn phone_format() {
        for good in ["5551234567", "+442071234567", "7"] {
            assert!(PHONE.is_match(good), "{good}");
        }
        for bad in ["", "0555", "+0555", "555-123-4567", "12345678901234567", "٣٣٣", "+٥٥٥١٢٣"] {
            assert!(!PHONE.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn email_format() {
        assert!(EMAIL.is_match("owner@shop.example.com"));
        assert!(!EMAIL.is_match("owner@localhost"));
        assert!(!EMAIL.is_match("owner @shop.com"));
    }

    #[test]
    fn non_ascii_digits_are_not_a_phone_number() {
        let mut business = valid_business();
        business.phone = "٣٣٣".into();
        assert_eq!(fields(&validate_business_data(&business)), ["phone"]);
    }

    #[test]
    fn category_must_be_in_the_catalog() {
        let mut business = valid_business();
        business.category = "spaceport".into();
        let errors = validate_business_data(&business);
        assert_eq!(errors, [FieldError::new("category", "Unknown business category")]);
    }
}
