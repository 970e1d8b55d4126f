use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;

lazy_static! {
    /// Regex for trailing commas before } or ]
    static ref TRAILING_COMMA_RE: Regex = Regex::new(r",(\s*[}\]])").unwrap();
}

/// Extract JSON string from text (handles multiple formats)
///
/// Tries in order:
/// 1. JSON in markdown code block: ```json ... ```
/// 2. Generic markdown code block: ``` ... ```
/// 3. Plain JSON starting with {
/// 4. JSON embedded anywhere in text (find { to })
pub fn extract_json_string(text: &str) -> Result<String, String> {
    // Try 1: Markdown code block with json
    if text.contains("```json") {
        return text
            .split("```json")
            .nth(1)
            .and_then(|s| s.split("```").next())
            .map(|s| s.trim().to_string())
            .ok_or_else(|| "Failed to extract JSON from markdown code block".to_string());
    }

    // Try 2: Generic markdown code block
    if text.contains("```") {
        if let Some(start) = text.find("```") {
            let block_start = start + 3;
            // Skip optional language identifier on the same line
            if let Some(newline_offset) = text[block_start..].find('\n') {
                let json_start = block_start + newline_offset + 1;
                if let Some(end_offset) = text[json_start..].find("```") {
                    return Ok(text[json_start..json_start + end_offset].trim().to_string());
                }
            }
        }
    }

    // Try 3: Plain JSON starting with {
    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        return Ok(trimmed.to_string());
    }

    // Try 4: Embedded JSON (find first { to last })
    let start = text
        .find('{')
        .ok_or_else(|| "No JSON object found in response".to_string())?;

    let end = text
        .rfind('}')
        .ok_or_else(|| "Incomplete JSON object in response".to_string())?;

    if start < end {
        Ok(text[start..=end].to_string())
    } else {
        Err("Invalid JSON boundaries in response".to_string())
    }
}

/// Fix trailing commas in JSON (common LLM mistake)
///
/// Example: `{"name": "John",}` -> `{"name": "John"}`
pub fn fix_trailing_commas(json_str: &str) -> String {
    TRAILING_COMMA_RE.replace_all(json_str, "$1").to_string()
}

/// Parse an LLM reply into the target type.
///
/// Extracts the JSON object from the surrounding text (markdown fences,
/// chatter), tries a direct parse, then retries once after stripping
/// trailing commas. Anything the caller cannot parse this way is treated as
/// not-valid-JSON; the caller decides the fallback.
pub fn parse_json<T>(text: &str) -> Result<T, String>
where
    T: DeserializeOwned,
{
    let json_str = extract_json_string(text)?;

    // Fast path
    if let Ok(parsed) = serde_json::from_str::<T>(&json_str) {
        return Ok(parsed);
    }

    let fixed_json = fix_trailing_commas(&json_str);
    serde_json::from_str::<T>(&fixed_json).map_err(|e| {
        format!(
            "Failed to parse JSON reply: {} (first 200 chars: {})",
            e,
            json_str.chars().take(200).collect::<String>()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct TestResponse {
        pub title: String,
        pub count: Option<i32>,
    }

    // ==================== extract_json_string tests ====================

    #[test]
    fn test_extract_json_string_with_json_code_block() {
        let response = r#"Here is the result:

```json
{
    "title": "Test",
    "count": 3
}
```

That's it."#;

        let json = extract_json_string(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
        assert!(json.contains("\"title\""));
    }

    #[test]
    fn test_extract_json_string_with_generic_code_block() {
        let response = r#"```
{
    "title": "Test"
}
```"#;

        let json = extract_json_string(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
    }

    #[test]
    fn test_extract_json_string_plain_json() {
        let response = r#"{"title": "Test", "count": 1}"#;

        let json = extract_json_string(response).unwrap();
        assert_eq!(json, response);
    }

    #[test]
    fn test_extract_json_string_embedded() {
        let response = "Some text before {\"title\": \"Test\"} some text after";

        let json = extract_json_string(response).unwrap();
        assert_eq!(json, r#"{"title": "Test"}"#);
    }

    #[test]
    fn test_extract_json_string_no_json() {
        let response = "No JSON here at all!";

        let result = extract_json_string(response);
        assert!(result.is_err());
    }

    // ==================== fix_trailing_commas tests ====================

    #[test]
    fn test_fix_trailing_commas() {
        // Should remove trailing comma before }
        let input = r#"{"name": "John", "age": 30,}"#;
        let fixed = fix_trailing_commas(input);
        assert_eq!(fixed, r#"{"name": "John", "age": 30}"#);

        // Should remove trailing comma before ]
        let input2 = r#"{"items": [1, 2, 3,]}"#;
        let fixed2 = fix_trailing_commas(input2);
        assert_eq!(fixed2, r#"{"items": [1, 2, 3]}"#);

        // Nested trailing commas
        let input3 = r#"{"obj": {"nested": true,},}"#;
        let fixed3 = fix_trailing_commas(input3);
        assert_eq!(fixed3, r#"{"obj": {"nested": true}}"#);
    }

    // ==================== parse_json tests ====================

    #[test]
    fn test_parse_json_valid() {
        let input = r#"{"title": "Test Title", "count": 42}"#;

        let result: TestResponse = parse_json(input).unwrap();
        assert_eq!(result.title, "Test Title");
        assert_eq!(result.count, Some(42));
    }

    #[test]
    fn test_parse_json_markdown() {
        let input = r#"Here's the response:

```json
{"title": "Markdown Test"}
```"#;

        let result: TestResponse = parse_json(input).unwrap();
        assert_eq!(result.title, "Markdown Test");
    }

    #[test]
    fn test_parse_json_with_trailing_comma() {
        let input = r#"{"title": "Test",}"#;

        let result: TestResponse = parse_json(input).unwrap();
        assert_eq!(result.title, "Test");
    }

    #[test]
    fn test_parse_json_invalid_is_error() {
        let input = "This is not JSON at all";

        let result: Result<TestResponse, String> = parse_json(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_json_wrong_shape_is_error() {
        let input = r#"{"unexpected": true}"#;

        let result: Result<TestResponse, String> = parse_json(input);
        assert!(result.is_err());
    }
}
