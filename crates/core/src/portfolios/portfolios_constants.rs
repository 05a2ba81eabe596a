/// Crypto portfolio weights ("Carteira Cripto")
pub const CRYPTO_WEIGHTS: &[(&str, f64)] = &[
    ("BTC-USD", 0.65),
    ("ETH-USD", 0.10),
    ("SOL-USD", 0.025),
    ("LTC-USD", 0.025),
    ("XRP-USD", 0.025),
    ("ADA-USD", 0.05),
    ("DOGE-USD", 0.025),
    ("USDT-USD", 0.05),
    ("CASH", 0.05),
];

/// International equities portfolio weights ("Carteira Internacional")
pub const INTERNATIONAL_WEIGHTS: &[(&str, f64)] = &[
    ("AMZN", 0.10),
    ("BK", 0.05),
    ("BRK-B", 0.10),
    ("CRM", 0.05),
    ("CSCO", 0.05),
    ("CVX", 0.05),
    ("GOOGL", 0.10),
    ("IVV", 0.15),
    ("MSFT", 0.10),
    ("NVDA", 0.08),
    ("PYPL", 0.07),
    ("SOXX", 0.10),
];

pub const CRYPTO_BENCHMARK_SYMBOL: &str = "HASH11.SA";
pub const CRYPTO_BENCHMARK_LABEL: &str = "HASH11";

pub const INTERNATIONAL_BENCHMARK_SYMBOL: &str = "^GSPC";
pub const INTERNATIONAL_BENCHMARK_LABEL: &str = "S&P500";
