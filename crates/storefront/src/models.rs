//! Shopper identity and profile models.

use serde::{Deserialize, Serialize};

use monsoon_core::Email;

/// The authenticated shopper, as returned by `GET /profile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Account email address.
    pub email: Email,
    /// First name, set at registration.
    pub first_name: String,
    /// Last name, set at registration.
    pub last_name: String,
    /// Shipping and contact details, absent until the shopper fills them in.
    #[serde(default)]
    pub profile: Option<Profile>,
}

impl User {
    /// The shopper's full display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }

    /// The shopper's country, if a non-blank one is on the profile.
    ///
    /// This is what the currency converter resolves the display currency
    /// from.
    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.profile
            .as_ref()?
            .country
            .as_deref()
            .filter(|country| !country.trim().is_empty())
    }
}

/// Shipping and contact details attached to a user.
///
/// Every field is optional on the wire; checkout enforces its own required
/// subset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub address_line1: Option<String>,
    #[serde(default)]
    pub address_line2: Option<String>,
    #[serde(default)]
    pub landmark: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Partial profile update for `PUT /profile`.
///
/// Only set fields are serialized; the service leaves the rest unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user_with_country(country: Option<&str>) -> User {
        User {
            email: Email::parse("jane@example.com").unwrap(),
            first_name: "Jane".to_owned(),
            last_name: "Doe".to_owned(),
            profile: Some(Profile {
                country: country.map(ToOwned::to_owned),
                ..Profile::default()
            }),
        }
    }

    #[test]
    fn test_full_name() {
        let user = user_with_country(None);
        assert_eq!(user.full_name(), "Jane Doe");
    }

    #[test]
    fn test_country_filters_blank() {
        assert_eq!(
            user_with_country(Some("United Kingdom")).country(),
            Some("United Kingdom")
        );
        assert_eq!(user_with_country(Some("   ")).country(), None);
        assert_eq!(user_with_country(None).country(), None);
    }

    #[test]
    fn test_profile_update_skips_unset_fields() {
        let update = ProfileUpdate {
            city: Some("Mumbai".to_owned()),
            ..ProfileUpdate::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, "{\"city\":\"Mumbai\"}");
    }

    #[test]
    fn test_user_deserializes_without_profile() {
        let user: User = serde_json::from_str(
            "{\"email\":\"a@b.com\",\"first_name\":\"A\",\"last_name\":\"B\"}",
        )
        .unwrap();
        assert!(user.profile.is_none());
    }
}
