use snafu::ResultExt;

pub use futures::future::LocalBoxFuture;

use crate::error::{DecodeReplySnafu, EncodeRequestSnafu, ExchangeResult, StatusSnafu};
use crate::wire::{ChatReply, ChatRequest};

/// Longest slice of an error body kept in a status error.
const STATUS_BODY_PREVIEW_CHARS: usize = 256;

/// Remote chat service reachable with one request/response pair.
///
/// Futures are `!Send`: the browser transport runs on the single UI thread.
pub trait ChatBackend {
    fn endpoint(&self) -> &str;
    fn send<'a>(&'a self, request: ChatRequest) -> LocalBoxFuture<'a, ExchangeResult<ChatReply>>;
}

pub fn encode_request(request: &ChatRequest) -> ExchangeResult<String> {
    serde_json::to_string(request).context(EncodeRequestSnafu {
        stage: "encode-chat-request",
    })
}

/// Interprets a raw HTTP status and body as a chat reply.
///
/// Any non-2xx status is a failure, whatever the body contains.
pub fn decode_reply(status: u16, body: &str) -> ExchangeResult<ChatReply> {
    if !(200..300).contains(&status) {
        return StatusSnafu {
            stage: "chat-http-status",
            status,
            body: body.chars().take(STATUS_BODY_PREVIEW_CHARS).collect::<String>(),
        }
        .fail();
    }

    serde_json::from_str(body).context(DecodeReplySnafu {
        stage: "decode-chat-reply",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExchangeError;

    #[test]
    fn request_encodes_single_message_field() {
        let body = encode_request(&ChatRequest::new("where is my parcel?")).expect("encodes");

        assert_eq!(body, r#"{"message":"where is my parcel?"}"#);
    }

    #[test]
    fn ok_status_with_response_field_decodes() {
        let reply = decode_reply(200, r#"{"response": "Hello!"}"#).expect("decodes");

        assert_eq!(reply.response, "Hello!");
    }

    #[test]
    fn non_success_status_fails_even_with_valid_body() {
        let error = decode_reply(503, r#"{"response": "down"}"#).expect_err("503 fails");

        assert!(matches!(error, ExchangeError::Status { status: 503, .. }));
    }

    #[test]
    fn status_error_body_is_truncated() {
        let body = "x".repeat(1_000);
        let error = decode_reply(500, &body).expect_err("500 fails");

        let ExchangeError::Status { body, .. } = error else {
            panic!("expected status error");
        };
        assert_eq!(body.len(), STATUS_BODY_PREVIEW_CHARS);
    }

    #[test]
    fn html_body_is_a_decode_failure() {
        let error = decode_reply(200, "<html>gateway</html>").expect_err("not json");

        assert_eq!(error.stage(), "decode-chat-reply");
    }

    #[test]
    fn missing_response_field_is_a_decode_failure() {
        let error = decode_reply(200, r#"{"reply": "Hello!"}"#).expect_err("wrong field");

        assert!(matches!(error, ExchangeError::DecodeReply { .. }));
    }
}
