use chatdock_chat::backend::encode_request;
use chatdock_chat::{ChatBackend, ChatReply, ChatRequest, ExchangeError, ExchangeResult, LocalBoxFuture, decode_reply};
use futures::FutureExt;
use gloo_net::http::Request;

/// Chat backend reached with `fetch` on the page's origin.
pub(crate) struct FetchChatBackend {
    endpoint: String,
}

impl FetchChatBackend {
    pub(crate) fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    async fn post(&self, request: ChatRequest) -> ExchangeResult<ChatReply> {
        let body = encode_request(&request)?;
        let response = Request::post(&self.endpoint)
            .header("content-type", "application/json")
            .body(body)
            .map_err(|error| ExchangeError::transport("build-chat-request", &self.endpoint, error))?
            .send()
            .await
            .map_err(|error| ExchangeError::transport("send-chat-request", &self.endpoint, error))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|error| ExchangeError::transport("read-chat-reply", &self.endpoint, error))?;
        log::debug!("chat endpoint answered with status {status}");
        decode_reply(status, &text)
    }
}

impl ChatBackend for FetchChatBackend {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn send<'a>(&'a self, request: ChatRequest) -> LocalBoxFuture<'a, ExchangeResult<ChatReply>> {
        self.post(request).boxed_local()
    }
}
