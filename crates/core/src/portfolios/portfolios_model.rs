//! Portfolio configuration models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::portfolios_constants::*;
use crate::constants::CASH_SYMBOL;
use crate::errors::ValidationError;

/// The two configured portfolios a report can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PortfolioKind {
    Crypto,
    International,
}

impl PortfolioKind {
    pub const ALL: [PortfolioKind; 2] = [PortfolioKind::Crypto, PortfolioKind::International];

    pub fn as_str(&self) -> &'static str {
        match self {
            PortfolioKind::Crypto => "crypto",
            PortfolioKind::International => "international",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PortfolioKind::Crypto => "Carteira Cripto",
            PortfolioKind::International => "Carteira Internacional",
        }
    }

    /// Weights and benchmark configured for this portfolio.
    pub fn definition(&self) -> PortfolioDefinition {
        let (weights, symbol, label) = match self {
            PortfolioKind::Crypto => (
                CRYPTO_WEIGHTS,
                CRYPTO_BENCHMARK_SYMBOL,
                CRYPTO_BENCHMARK_LABEL,
            ),
            PortfolioKind::International => (
                INTERNATIONAL_WEIGHTS,
                INTERNATIONAL_BENCHMARK_SYMBOL,
                INTERNATIONAL_BENCHMARK_LABEL,
            ),
        };
        PortfolioDefinition {
            kind: *self,
            name: self.display_name().to_string(),
            weights: WeightVector::from_pairs(weights),
            benchmark: Benchmark {
                symbol: symbol.to_string(),
                label: label.to_string(),
            },
        }
    }
}

impl fmt::Display for PortfolioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PortfolioKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PortfolioKind::ALL
            .into_iter()
            .find(|kind| {
                kind.as_str().eq_ignore_ascii_case(s.trim())
                    || kind.display_name().eq_ignore_ascii_case(s.trim())
            })
            .ok_or_else(|| ValidationError::UnknownPortfolio(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetWeight {
    pub symbol: String,
    pub weight: f64,
}

/// Ticker to fractional weight, in configuration order.
///
/// Weights are applied as given: they are neither validated to sum to one
/// nor renormalized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightVector(Vec<AssetWeight>);

impl WeightVector {
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(symbol, weight)| AssetWeight {
                    symbol: symbol.to_string(),
                    weight: *weight,
                })
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetWeight> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Weight of `symbol`, zero when it is not part of the vector.
    pub fn weight_of(&self, symbol: &str) -> f64 {
        self.0
            .iter()
            .find(|w| w.symbol == symbol)
            .map_or(0.0, |w| w.weight)
    }

    pub fn has_cash(&self) -> bool {
        self.0.iter().any(|w| w.symbol == CASH_SYMBOL)
    }

    /// Symbols priced directly by the provider (everything but cash).
    pub fn priced_symbols(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .map(|w| w.symbol.as_str())
            .filter(|s| *s != CASH_SYMBOL)
    }

    pub fn total(&self) -> f64 {
        self.0.iter().map(|w| w.weight).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmark {
    /// Provider symbol
    pub symbol: String,
    /// Label used for the benchmark row and chart legend
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDefinition {
    pub kind: PortfolioKind,
    pub name: String,
    pub weights: WeightVector,
    pub benchmark: Benchmark,
}
