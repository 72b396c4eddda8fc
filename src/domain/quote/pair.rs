//! Currency pair identifiers

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

const PAIR_SEPARATOR: char = '_';
const LIST_SEPARATOR: char = ',';

/// Ordered currency pair, written `FROM_TO` (e.g. `USD_JPY`)
///
/// Codes keep the caller's casing; cache lookups case-fold them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyPair {
    from: String,
    to: String,
}

impl CurrencyPair {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }
}

impl std::fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.from, PAIR_SEPARATOR, self.to)
    }
}

impl std::str::FromStr for CurrencyPair {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(PAIR_SEPARATOR);

        match (parts.next(), parts.next(), parts.next()) {
            (Some(from), Some(to), None) if !from.is_empty() && !to.is_empty() => {
                Ok(Self::new(from, to))
            }
            _ => Err(DomainError::validation(format!(
                "Invalid currency pair '{}'. Expected FROM_TO, e.g. USD_JPY",
                s
            ))),
        }
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.to_string()
    }
}

/// Parses a comma separated pair list such as `"USD_JPY, EUR_USD"`
///
/// Items are trimmed and blanks dropped. Order and duplicates are preserved.
pub fn parse_pair_list(input: &str) -> Result<Vec<CurrencyPair>, DomainError> {
    let pairs = input
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::parse)
        .collect::<Result<Vec<CurrencyPair>, _>>()?;

    if pairs.is_empty() {
        return Err(DomainError::validation("At least one currency pair is required"));
    }

    Ok(pairs)
}
