//! Shape checks for decoded API responses.
//!
//! The `is_*` predicates answer "can this be trusted?"; the extractors
//! return the typed names or a [`FetchError::Shape`] naming the expected key.

use serde_json::Value;

use super::error::FetchError;

/// Key holding a state's display name in the states response.
pub const STATE_NAME_KEY: &str = "state_name";

/// Key holding a city's display name in the cities response.
pub const CITY_NAME_KEY: &str = "city_name";

/// Key holding the bearer token in the access token response.
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Array of objects, each with a string `state_name`.
pub fn is_states_response(value: &Value) -> bool {
    is_named_array(value, STATE_NAME_KEY)
}

/// Array of objects, each with a string `city_name`.
pub fn is_cities_response(value: &Value) -> bool {
    is_named_array(value, CITY_NAME_KEY)
}

pub fn state_names(value: &Value) -> Result<Vec<String>, FetchError> {
    extract_names(value, STATE_NAME_KEY, "states", "state")
}

pub fn city_names(value: &Value) -> Result<Vec<String>, FetchError> {
    extract_names(value, CITY_NAME_KEY, "cities", "city")
}

/// Pull the string `auth_token` out of the token response.
pub fn access_token(value: &Value) -> Result<String, FetchError> {
    let token = value
        .get(AUTH_TOKEN_KEY)
        .ok_or_else(|| FetchError::Shape(format!("{} key is missing.", AUTH_TOKEN_KEY)))?;

    token
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| FetchError::Shape(format!("{} is not of type String.", AUTH_TOKEN_KEY)))
}

fn is_named_array(value: &Value, key: &str) -> bool {
    value.as_array().is_some_and(|items| {
        items
            .iter()
            .all(|item| item.as_object().and_then(|obj| obj.get(key)).is_some_and(Value::is_string))
    })
}

fn extract_names(
    value: &Value,
    key: &str,
    what: &str,
    noun: &str,
) -> Result<Vec<String>, FetchError> {
    if !is_named_array(value, key) {
        return Err(FetchError::Shape(format!(
            "Unexpected {} response type. Expected an array of objects with a key: {} containing the {} name",
            what, key, noun
        )));
    }

    Ok(value
        .as_array()
        .into_iter()
        .flatten()
        .filter_map(|item| item.get(key).and_then(Value::as_str))
        .map(str::to_owned)
        .collect())
}
