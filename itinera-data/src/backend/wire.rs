//! Response envelopes used by the trip backend.

use itinera_core::PriceQuote;
use serde::Deserialize;

/// Error body: `{"message": "..."}` or, for validation failures,
/// `{"message": ["...", "..."]}`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Message {
    One(String),
    Many(Vec<String>),
}

impl Message {
    pub fn into_text(self) -> String {
        match self {
            Self::One(text) => text,
            Self::Many(lines) => lines.join("; "),
        }
    }
}

/// Extract the backend's own message from an error body, if it sent one.
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .map(Message::into_text)
        .filter(|text| !text.trim().is_empty())
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QuoteEnvelope {
    Wrapped { data: PriceQuote },
    Bare(PriceQuote),
}

impl QuoteEnvelope {
    pub fn into_quote(self) -> PriceQuote {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TripIdentity {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub data: Option<Box<TripIdentity>>,
}

/// Identifier of a stored trip, found at `id` or `data.id`.
pub fn trip_id(body: &str) -> Option<u64> {
    let identity: TripIdentity = serde_json::from_str(body).ok()?;
    identity.id.or_else(|| identity.data.and_then(|inner| inner.id))
}
