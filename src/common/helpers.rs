// Helper functions for safe logging and serialization

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Masks email addresses for safe logging
/// Prevents sensitive data exposure while preserving debugging utility
///
/// # Example
/// ```
/// let masked = safe_email_log("user@example.com");
/// // Returns: "u***@example.com"
/// ```
pub fn safe_email_log(email: &str) -> String {
    if email.len() > 3 {
        let parts: Vec<&str> = email.split('@').collect();
        if parts.len() == 2 {
            format!("{}***@{}", &parts[0][..1.min(parts[0].len())], parts[1])
        } else {
            "***@***.***".to_string()
        }
    } else {
        "***@***.***".to_string()
    }
}

/// Serializes a JSON-encoded string column to an array for API responses
pub fn serialize_string_list<S>(list: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match list {
        Some(list_json) => {
            let values: Vec<String> =
                serde_json::from_str(list_json).unwrap_or_else(|_| Vec::new());
            values.serialize(serializer)
        }
        None => Vec::<String>::new().serialize(serializer),
    }
}

/// Deserializes an array field to a JSON string for database storage
pub fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Option<Vec<String>> = Option::deserialize(deserializer)?;
    match values {
        Some(v) => {
            let list_json = serde_json::to_string(&v).map_err(serde::de::Error::custom)?;
            Ok(Some(list_json))
        }
        None => Ok(None),
    }
}
