//! JSON output formatting

use serde::Serialize;

use crate::error::Result;

/// Serialize data as pretty-printed JSON
pub fn to_json_pretty<T: Serialize>(data: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json_pretty() {
        let data = serde_json::json!({"enabled": true});
        let out = to_json_pretty(&data).unwrap();
        assert!(out.contains("\"enabled\": true"));
    }
}
