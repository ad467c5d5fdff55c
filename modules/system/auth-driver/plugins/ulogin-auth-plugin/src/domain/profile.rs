//! Profile returned by `token.php`.

use auth_driver_sdk::Gender;
use serde_json::{Map, Value};
use time::Date;
use time::macros::format_description;

use super::error::DomainError;

/// Decoded provider response.
///
/// Kept as the raw JSON object so it can be stored verbatim; typed accessors
/// read the keys the driver understands.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderProfile {
    raw: Map<String, Value>,
}

impl ProviderProfile {
    /// Decode a response body.
    ///
    /// # Errors
    ///
    /// `MalformedResponse` if `body` is not a JSON object.
    pub fn from_json(body: &str) -> Result<Self, DomainError> {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(raw)) => Ok(Self { raw }),
            Ok(other) => Err(DomainError::malformed(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
            Err(e) => Err(DomainError::malformed(e.to_string())),
        }
    }

    #[must_use]
    pub fn from_map(raw: Map<String, Value>) -> Self {
        Self { raw }
    }

    #[must_use]
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    #[must_use]
    pub fn into_raw(self) -> Map<String, Value> {
        self.raw
    }

    /// Non-empty string value of `key`.
    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.raw
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// The verified email of the user.
    ///
    /// # Errors
    ///
    /// - `ProviderRejected` if the response carries an `error` key
    /// - `EmailNotVerified` if `email` is missing or `verified_email` is not `"1"`
    pub fn verified_email(&self) -> Result<&str, DomainError> {
        if let Some(error) = self.raw.get("error") {
            let error = error
                .as_str()
                .map_or_else(|| error.to_string(), ToOwned::to_owned);
            return Err(DomainError::ProviderRejected { error });
        }

        let email = self.raw.get("email").and_then(Value::as_str);
        let verified = self.raw.get("verified_email").and_then(Value::as_str) == Some("1");
        match email {
            Some(email) if verified && !email.is_empty() => Ok(email),
            _ => Err(DomainError::EmailNotVerified {
                email: email.unwrap_or_default().to_owned(),
            }),
        }
    }

    /// `photo_big`, else `photo`.
    #[must_use]
    pub fn picture_url(&self) -> Option<&str> {
        self.str_field("photo_big").or_else(|| self.str_field("photo"))
    }

    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.str_field("first_name")
    }

    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.str_field("last_name")
    }

    /// `sex` of `1` is female, any other supplied value is male.
    #[must_use]
    pub fn gender(&self) -> Option<Gender> {
        let sex = match self.raw.get("sex")? {
            Value::Null => return None,
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        Some(if sex == Some(1) {
            Gender::Female
        } else {
            Gender::Male
        })
    }

    /// `bdate` as a calendar date.
    ///
    /// `None` when absent. `Some(Err(..))` when present but not a valid
    /// `DD.MM.YYYY` date, which the provider sends now and then.
    #[must_use]
    pub fn birth_date(&self) -> Option<Result<Date, time::error::Parse>> {
        let raw = self.str_field("bdate")?;
        let format = format_description!("[day padding:none].[month padding:none].[year]");
        Some(Date::parse(raw, &format))
    }

    /// Link to the user's profile on the originating network.
    #[must_use]
    pub fn profile_url(&self) -> Option<&str> {
        self.str_field("profile")
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use serde_json::json;
    use time::Month;

    use super::*;

    fn profile(value: Value) -> ProviderProfile {
        match value {
            Value::Object(map) => ProviderProfile::from_map(map),
            _ => panic!("test profile must be an object"),
        }
    }

    #[test]
    fn non_object_body_is_malformed() {
        for body in ["[]", "\"x\"", "not json", ""] {
            assert!(matches!(
                ProviderProfile::from_json(body),
                Err(DomainError::MalformedResponse { .. })
            ));
        }
    }

    #[test]
    fn verified_email_requires_literal_one() {
        let ok = profile(json!({"email": "a@example.com", "verified_email": "1"}));
        assert_eq!(ok.verified_email().unwrap(), "a@example.com");

        for bad in [
            json!({"email": "a@example.com", "verified_email": 1}),
            json!({"email": "a@example.com", "verified_email": "0"}),
            json!({"email": "a@example.com"}),
            json!({"verified_email": "1"}),
        ] {
            assert!(matches!(
                profile(bad).verified_email(),
                Err(DomainError::EmailNotVerified { .. })
            ));
        }
    }

    #[test]
    fn error_key_wins_over_email() {
        let p = profile(json!({
            "error": "token expired",
            "email": "a@example.com",
            "verified_email": "1",
        }));
        assert!(matches!(
            p.verified_email(),
            Err(DomainError::ProviderRejected { error }) if error == "token expired"
        ));
    }

    #[test]
    fn picture_prefers_big_photo() {
        let both = profile(json!({"photo": "http://p/s.jpg", "photo_big": "http://p/b.jpg"}));
        assert_eq!(both.picture_url(), Some("http://p/b.jpg"));

        let small = profile(json!({"photo": "http://p/s.jpg", "photo_big": ""}));
        assert_eq!(small.picture_url(), Some("http://p/s.jpg"));

        assert_eq!(profile(json!({})).picture_url(), None);
    }

    #[test]
    fn gender_mapping() {
        assert_eq!(profile(json!({"sex": 1})).gender(), Some(Gender::Female));
        assert_eq!(profile(json!({"sex": "1"})).gender(), Some(Gender::Female));
        assert_eq!(profile(json!({"sex": 2})).gender(), Some(Gender::Male));
        assert_eq!(profile(json!({"sex": "0"})).gender(), Some(Gender::Male));
        assert_eq!(profile(json!({"sex": null})).gender(), None);
        assert_eq!(profile(json!({})).gender(), None);
    }

    #[test]
    fn birth_date_parsing() {
        let date = profile(json!({"bdate": "07.03.1990"}))
            .birth_date()
            .unwrap()
            .unwrap();
        assert_eq!(date, Date::from_calendar_date(1990, Month::March, 7).unwrap());

        let short = profile(json!({"bdate": "7.3.1990"})).birth_date().unwrap();
        assert_eq!(short.unwrap(), date);

        assert!(profile(json!({"bdate": "31.02.2020"})).birth_date().unwrap().is_err());
        assert!(profile(json!({"bdate": "1990-03-07"})).birth_date().unwrap().is_err());
        assert!(profile(json!({})).birth_date().is_none());
    }
}
