//! The estimator's answer.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// A monetary or distance figure from the estimator.
///
/// The backend emits decimals either as JSON numbers or as strings such as
/// `"120.50"`; both are accepted.
///
/// # Examples
/// ```
/// use itinera_core::Amount;
///
/// let a: Amount = serde_json::from_str(r#""12.5""#)?;
/// let b: Amount = serde_json::from_str("12.5")?;
/// assert_eq!(a, b);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(try_from = "RawAmount")]
pub struct Amount(pub f64);

impl Amount {
    /// The value when it is finite and not zero.
    #[must_use]
    pub fn nonzero(self) -> Option<f64> {
        (self.0.is_finite() && self.0 != 0.0).then_some(self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

/// A string amount that is not a decimal number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid amount {input:?}")]
pub struct AmountParseError {
    input: String,
}

impl TryFrom<RawAmount> for Amount {
    type Error = AmountParseError;

    fn try_from(raw: RawAmount) -> Result<Self, Self::Error> {
        match raw {
            RawAmount::Number(value) => Ok(Self(value)),
            RawAmount::Text(text) => text
                .trim()
                .parse::<f64>()
                .map(Self)
                .map_err(|_| AmountParseError { input: text }),
        }
    }
}

/// Price estimate for a trip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    /// Total price for the party.
    #[serde(default)]
    pub total: Amount,
    /// Suggested price per person.
    #[serde(default)]
    pub per_person: Amount,
    /// Hotel nights priced.
    #[serde(default)]
    pub nights: u32,
    /// Estimated driving distance.
    #[serde(default)]
    pub distance_km: Amount,
    /// Named cost components.
    #[serde(default)]
    pub breakdown: BTreeMap<String, Amount>,
    /// Suggested meal price per person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_person_meals: Option<Amount>,
    /// Suggested transport price per person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_person_transport: Option<Amount>,
    /// Suggested attraction fees per person.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_person_poi: Option<Amount>,
}
