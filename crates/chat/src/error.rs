use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ExchangeError {
    #[snafu(display("chat request to '{endpoint}' failed on `{stage}`: {message}"))]
    Transport {
        stage: &'static str,
        endpoint: String,
        message: String,
    },
    #[snafu(display("chat endpoint returned status {status}: {body}"))]
    Status {
        stage: &'static str,
        status: u16,
        body: String,
    },
    #[snafu(display("failed to encode chat request on `{stage}`: {source}"))]
    EncodeRequest {
        stage: &'static str,
        source: serde_json::Error,
    },
    #[snafu(display("failed to decode chat reply on `{stage}`: {source}"))]
    DecodeReply {
        stage: &'static str,
        source: serde_json::Error,
    },
}

impl ExchangeError {
    /// Builds a transport failure from any displayable platform error.
    pub fn transport(
        stage: &'static str,
        endpoint: impl Into<String>,
        error: impl std::fmt::Display,
    ) -> Self {
        Self::Transport {
            stage,
            endpoint: endpoint.into(),
            message: error.to_string(),
        }
    }

    pub fn stage(&self) -> &'static str {
        match self {
            Self::Transport { stage, .. }
            | Self::Status { stage, .. }
            | Self::EncodeRequest { stage, .. }
            | Self::DecodeReply { stage, .. } => stage,
        }
    }
}

pub type ExchangeResult<T> = Result<T, ExchangeError>;
