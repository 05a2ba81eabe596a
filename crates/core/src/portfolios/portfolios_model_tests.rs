//! Tests for portfolio configuration models.

use super::*;
use crate::constants::CASH_SYMBOL;

#[test]
fn test_crypto_definition_has_cash_and_hash11_benchmark() {
    let def = PortfolioKind::Crypto.definition();
    assert_eq!(def.name, "Carteira Cripto");
    assert!(def.weights.has_cash());
    assert_eq!(def.benchmark.symbol, "HASH11.SA");
    assert_eq!(def.benchmark.label, "HASH11");
    assert_eq!(def.weights.weight_of("BTC-USD"), 0.65);
}

#[test]
fn test_international_definition_has_no_cash() {
    let def = PortfolioKind::International.definition();
    assert!(!def.weights.has_cash());
    assert_eq!(def.benchmark.symbol, "^GSPC");
    assert_eq!(def.benchmark.label, "S&P500");
    assert_eq!(def.weights.len(), 12);
}

#[test]
fn test_priced_symbols_skip_cash() {
    let def = PortfolioKind::Crypto.definition();
    let symbols: Vec<&str> = def.weights.priced_symbols().collect();
    assert_eq!(symbols.len(), def.weights.len() - 1);
    assert!(!symbols.contains(&CASH_SYMBOL));
    assert_eq!(symbols.first(), Some(&"BTC-USD"));
}

#[test]
fn test_weights_are_not_renormalized() {
    let weights = WeightVector::from_pairs(&[("A", 0.5), ("B", 0.3)]);
    assert!((weights.total() - 0.8).abs() < 1e-12);
    assert_eq!(weights.weight_of("A"), 0.5);
    assert_eq!(weights.weight_of("MISSING"), 0.0);
}

#[test]
fn test_configured_weights_sum_to_one() {
    for kind in PortfolioKind::ALL {
        let total = kind.definition().weights.total();
        assert!((total - 1.0).abs() < 1e-9, "{} sums to {}", kind, total);
    }
}

#[test]
fn test_parse_portfolio_kind() {
    assert_eq!("crypto".parse::<PortfolioKind>().unwrap(), PortfolioKind::Crypto);
    assert_eq!(
        "Carteira Internacional".parse::<PortfolioKind>().unwrap(),
        PortfolioKind::International
    );
    assert_eq!(
        " INTERNATIONAL ".parse::<PortfolioKind>().unwrap(),
        PortfolioKind::International
    );
    assert!("bonds".parse::<PortfolioKind>().is_err());
}

#[test]
fn test_portfolio_kind_serializes_camel_case() {
    let json = serde_json::to_string(&PortfolioKind::International).unwrap();
    assert_eq!(json, "\"international\"");
}
