//! Classification and decoding of individual stream lines.

/// Prefix of every event-data line.
pub const DATA_PREFIX: &str = "data: ";

/// Payload marking explicit end of stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// A single line of the response body, without its line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty or whitespace-only.
    Blank,
    /// Starts with `:` (keep-alives and other comments).
    Comment,
    /// `data: [DONE]`.
    Sentinel,
    /// `data: <payload>`, payload trimmed.
    Data(&'a str),
    /// Anything else (`event:`, `id:`, `data:` without a space, garbage).
    Ignored,
}

/// Classify one line. A trailing `\r` must already be stripped.
#[must_use]
pub fn classify(line: &str) -> Line<'_> {
    if line.starts_with(':') {
        return Line::Comment;
    }
    if line.trim().is_empty() {
        return Line::Blank;
    }
    match line.strip_prefix(DATA_PREFIX) {
        Some(payload) => {
            let payload = payload.trim();
            if payload == DONE_SENTINEL {
                Line::Sentinel
            } else {
                Line::Data(payload)
            }
        }
        None => Line::Ignored,
    }
}

/// Decode a data payload and pull out `choices[0].delta.content`.
///
/// Returns `Ok(None)` when the payload is valid JSON but carries no text:
/// the field is missing, not a string, or empty. Only malformed JSON is an
/// error.
pub fn decode_delta(payload: &str) -> Result<Option<String>, serde_json::Error> {
    let json: serde_json::Value = serde_json::from_str(payload)?;
    let content = json["choices"][0]["delta"]["content"]
        .as_str()
        .filter(|text| !text.is_empty())
        .map(str::to_owned);
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_comment_and_blank() {
        assert_eq!(classify(": keep-alive"), Line::Comment);
        assert_eq!(classify(":"), Line::Comment);
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(classify("   \t"), Line::Blank);
    }

    #[test]
    fn classify_data_trims_payload() {
        assert_eq!(classify("data: {\"a\":1}  "), Line::Data("{\"a\":1}"));
        assert_eq!(classify("data:  [DONE] "), Line::Sentinel);
    }

    #[test]
    fn classify_requires_space_after_colon() {
        assert_eq!(classify("data:{\"a\":1}"), Line::Ignored);
        assert_eq!(classify("event: message"), Line::Ignored);
        assert_eq!(classify("DATA: x"), Line::Ignored);
    }

    #[test]
    fn decode_delta_extracts_content() {
        let payload = r#"{"choices":[{"delta":{"content":"Hel"}}]}"#;
        assert_eq!(decode_delta(payload).unwrap().as_deref(), Some("Hel"));
    }

    #[test]
    fn decode_delta_missing_field_is_none() {
        for payload in [
            r#"{"choices":[{"delta":{"role":"assistant"}}]}"#,
            r#"{"choices":[{"delta":{"content":""}}]}"#,
            r#"{"choices":[{"delta":{"content":null}}]}"#,
            r#"{"choices":[]}"#,
            r#"{}"#,
            "42",
        ] {
            assert_eq!(decode_delta(payload).unwrap(), None, "payload: {payload}");
        }
    }

    #[test]
    fn decode_delta_only_reads_first_choice() {
        let payload = r#"{"choices":[{"delta":{}},{"delta":{"content":"second"}}]}"#;
        assert_eq!(decode_delta(payload).unwrap(), None);
    }

    #[test]
    fn decode_delta_rejects_truncated_json() {
        assert!(decode_delta(r#"{"choices":[{"delta":{"con"#).is_err());
    }
}
