//! Error classification.
//!
//! Normalizes raw provider failures (status code plus body/message text)
//! into the six-kind taxonomy. Rules are checked in priority order and
//! the first match wins; the table carries both Gemini-style patterns
//! (`API_KEY_INVALID`, `RESOURCE_EXHAUSTED`) and OpenAI-style ones
//! (`Incorrect API key`, `insufficient_quota`).

use crate::error::{ErrorKind, GenerationError};

/// Maps a raw provider failure to a classified [`GenerationError`].
///
/// `status` is the HTTP status when one was received; message-text
/// patterns still apply when it is absent (SDK-style error strings).
pub fn classify(status: Option<u16>, raw: &str) -> GenerationError {
    let kind = classify_kind(status, raw);
    GenerationError::new(kind, raw)
}

fn classify_kind(status: Option<u16>, raw: &str) -> ErrorKind {
    // 1. Explicit credential complaints beat everything, including the
    //    400 status Gemini wraps them in.
    if raw.contains("API key not valid")
        || raw.contains("API_KEY_INVALID")
        || raw.contains("Incorrect API key")
    {
        return ErrorKind::InvalidKey;
    }

    // 2. Model-not-found. Gemini reports unknown models as 404/"not
    //    found" with the model path in the message.
    if (status == Some(404) || raw.contains("not found") || raw.contains("404"))
        && mentions_model(raw)
    {
        return ErrorKind::InvalidModel;
    }

    // 3. Bad request: a model reference means a malformed model id,
    //    anything else is a plain invalid request.
    if status == Some(400) || raw.contains("400") || raw.contains("Bad Request") {
        return if mentions_model(raw) {
            ErrorKind::InvalidModel
        } else {
            ErrorKind::InvalidRequest
        };
    }

    // 4. Unauthorized.
    if status == Some(401) || raw.contains("401") || raw.contains("Unauthorized") {
        return ErrorKind::InvalidKey;
    }

    // 5. Quota / rate limiting.
    if status == Some(429)
        || raw.contains("429")
        || raw.contains("quota")
        || raw.contains("RESOURCE_EXHAUSTED")
        || raw.contains("rate limit")
    {
        return ErrorKind::RateLimit;
    }

    // 6. Transport failures that never produced a status.
    if raw.contains("fetch failed")
        || raw.contains("network")
        || raw.contains("connection")
        || raw.contains("timed out")
    {
        return ErrorKind::Network;
    }

    ErrorKind::Unknown
}

fn mentions_model(raw: &str) -> bool {
    raw.contains("model") || raw.contains("tunedModels")
}

/// Maps a reqwest transport error (no HTTP response at all).
pub fn classify_transport(error: &reqwest::Error) -> GenerationError {
    let detail = error.to_string();
    if error.is_connect() || error.is_timeout() || error.is_request() {
        GenerationError::new(ErrorKind::Network, detail)
    } else {
        GenerationError::new(ErrorKind::Unknown, detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kind(status: Option<u16>, raw: &str) -> ErrorKind {
        classify(status, raw).kind
    }

    #[test]
    fn test_invalid_key_patterns() {
        assert_eq!(kind(None, "API key not valid. Please pass a valid API key."), ErrorKind::InvalidKey);
        assert_eq!(kind(Some(400), "API_KEY_INVALID"), ErrorKind::InvalidKey);
        assert_eq!(kind(Some(401), "Incorrect API key provided"), ErrorKind::InvalidKey);
        assert_eq!(kind(Some(401), "Unauthorized"), ErrorKind::InvalidKey);
    }

    #[test]
    fn test_model_not_found() {
        assert_eq!(
            kind(Some(404), "models/gemini-nope is not found for API version v1beta"),
            ErrorKind::InvalidModel
        );
        assert_eq!(kind(None, "404 model not found"), ErrorKind::InvalidModel);
        // 404 without a model reference falls through to Unknown.
        assert_eq!(kind(Some(404), "no such route"), ErrorKind::Unknown);
    }

    #[test]
    fn test_bad_request_splits_on_model_reference() {
        assert_eq!(kind(Some(400), "tunedModels/foo does not exist"), ErrorKind::InvalidModel);
        assert_eq!(kind(Some(400), "InvalidArgument: bad payload"), ErrorKind::InvalidRequest);
        assert_eq!(kind(None, "400 Bad Request"), ErrorKind::InvalidRequest);
    }

    #[test]
    fn test_rate_limit_patterns() {
        assert_eq!(kind(Some(429), "Too Many Requests"), ErrorKind::RateLimit);
        assert_eq!(kind(None, "429 slow down"), ErrorKind::RateLimit);
        assert_eq!(kind(None, "You exceeded your current quota"), ErrorKind::RateLimit);
        assert_eq!(kind(Some(503), "RESOURCE_EXHAUSTED"), ErrorKind::RateLimit);
        assert_eq!(kind(None, "insufficient_quota: rate limit reached"), ErrorKind::RateLimit);
    }

    #[test]
    fn test_network_patterns() {
        assert_eq!(kind(None, "fetch failed"), ErrorKind::Network);
        assert_eq!(kind(None, "network unreachable"), ErrorKind::Network);
        assert_eq!(kind(None, "connection refused"), ErrorKind::Network);
    }

    #[test]
    fn test_unknown_fallthrough_keeps_raw_text() {
        let err = classify(Some(500), "Internal Server Error");
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert_eq!(err.detail, "Internal Server Error");
    }

    // Priority order: a message matching several rules resolves to the
    // first one in the list.

    #[test]
    fn test_invalid_key_beats_bad_request() {
        assert_eq!(kind(Some(400), "API_KEY_INVALID: bad request"), ErrorKind::InvalidKey);
    }

    #[test]
    fn test_model_not_found_beats_rate_limit_text() {
        assert_eq!(
            kind(None, "models/x not found, check quota docs"),
            ErrorKind::InvalidModel
        );
    }

    #[test]
    fn test_quota_beats_network_text() {
        assert_eq!(kind(None, "quota exceeded on this network"), ErrorKind::RateLimit);
    }
}
