//! Command-line arguments.
//!
//! Connection settings fall back to environment variables (and a `.env`
//! file, loaded by the binary before parsing):
//!
//! - `BITBAYPAY_PUBLIC_KEY` - API public key
//! - `BITBAYPAY_PRIVATE_KEY` - API private key
//! - `BITBAYPAY_BASE_URL` - API root (default: production)
//! - `BITBAYPAY_TIMEOUT_SECS` - per-request timeout in seconds

use std::time::Duration;

use bitbaypay::constants::BASE_URL;
use bitbaypay::payment::CreatePayment;
use bitbaypay::{Credentials, Parameters};
use bitbaypay_http::ClientConfig;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde_json::Value;

/// Command-line client for the BitBayPay gateway API.
#[derive(Debug, Parser)]
#[command(name = "bitbaypay", version, about)]
pub struct Cli {
    /// API public key.
    #[arg(long, env = "BITBAYPAY_PUBLIC_KEY", hide_env_values = true)]
    pub public_key: Option<String>,

    /// API private key.
    #[arg(long, env = "BITBAYPAY_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// API root every method path is appended to.
    #[arg(long, env = "BITBAYPAY_BASE_URL", default_value = BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "BITBAYPAY_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Builds the client configuration from the connection arguments.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        let credentials = Credentials::from_parts(self.public_key.clone(), self.private_key.clone());
        let config = ClientConfig::new(credentials).with_base_url(self.base_url.clone());
        match self.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

/// Gateway operations.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a payment.
    CreatePayment(CreatePaymentArgs),
    /// Fetch a payment by id.
    GetPayment {
        /// Payment identifier.
        payment_id: String,
    },
    /// List the store's currency settings.
    CurrenciesSettings,
    /// List the store's markets.
    Markets,
    /// Search payments.
    SearchPayments {
        /// Filter as `key=value`; values that parse as JSON keep their type.
        #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_parameter)]
        params: Vec<(String, Value)>,
    },
}

/// Arguments of `create-payment`.
#[derive(Debug, Args)]
pub struct CreatePaymentArgs {
    /// Currency the merchant receives.
    #[arg(long)]
    pub destination_currency: String,

    /// Amount to pay.
    #[arg(long)]
    pub price: Decimal,

    /// Merchant order identifier.
    #[arg(long)]
    pub order_id: String,

    /// Currency the customer pays in.
    #[arg(long)]
    pub source_currency: Option<String>,

    /// Which side covers the fee.
    #[arg(long)]
    pub covered_by: Option<String>,

    /// Whether the merchant keeps the source currency.
    #[arg(long)]
    pub keep_source_currency: Option<bool>,

    /// Redirect after success.
    #[arg(long)]
    pub success_callback_url: Option<String>,

    /// Redirect after failure.
    #[arg(long)]
    pub failure_callback_url: Option<String>,

    /// Status notification endpoint.
    #[arg(long)]
    pub notifications_url: Option<String>,
}

impl CreatePaymentArgs {
    /// Converts the arguments into a typed request.
    #[must_use]
    pub fn into_payment(self) -> CreatePayment {
        let mut payment = CreatePayment::new(self.destination_currency, self.price, self.order_id);
        payment.source_currency = self.source_currency;
        payment.covered_by = self.covered_by;
        payment.keep_source_currency = self.keep_source_currency;
        payment.success_callback_url = self.success_callback_url;
        payment.failure_callback_url = self.failure_callback_url;
        payment.notifications_url = self.notifications_url;
        payment
    }
}

/// Collects `key=value` pairs into call parameters, in argument order.
#[must_use]
pub fn into_parameters(pairs: Vec<(String, Value)>) -> Parameters {
    pairs.into_iter().collect()
}

fn parse_parameter(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    if key.is_empty() {
        return Err(format!("empty parameter name in `{raw}`"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_owned()));
    Ok((key.to_owned(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec![
            "bitbaypay",
            "--public-key",
            "public-key",
            "--private-key",
            "private-key",
        ];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_create_payment_args() {
        let cli = parse(&[
            "create-payment",
            "--destination-currency",
            "PLN",
            "--price",
            "100.50",
            "--order-id",
            "order-1",
            "--keep-source-currency",
            "true",
        ]);
        let Command::CreatePayment(args) = cli.command else {
            panic!("expected create-payment");
        };
        let parameters = args.into_payment().into_parameters();
        assert_eq!(
            Value::Object(parameters).to_string(),
            r#"{"destinationCurrency":"PLN","price":100.5,"orderId":"order-1","keep_source_currency":true}"#
        );
    }

    #[test]
    fn test_invalid_price_is_rejected() {
        let result = Cli::try_parse_from([
            "bitbaypay",
            "create-payment",
            "--destination-currency",
            "PLN",
            "--price",
            "abc",
            "--order-id",
            "order-1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_search_parameters_keep_order_and_types() {
        let cli = parse(&[
            "search-payments",
            "--param",
            "status=PAID",
            "--param",
            "pageSize=10",
            "--param",
            r#"currency=["BTC","ETH"]"#,
        ]);
        let Command::SearchPayments { params } = cli.command else {
            panic!("expected search-payments");
        };
        let parameters = into_parameters(params);
        assert_eq!(
            Value::Object(parameters),
            json!({"status": "PAID", "pageSize": 10, "currency": ["BTC", "ETH"]})
        );
    }

    #[test]
    fn test_parse_parameter_errors() {
        assert!(parse_parameter("status").is_err());
        assert!(parse_parameter("=PAID").is_err());
        assert_eq!(
            parse_parameter("orderId=a=b").unwrap(),
            ("orderId".to_owned(), json!("a=b"))
        );
    }

    #[test]
    fn test_client_config() {
        let cli = parse(&["--base-url", "http://localhost:8080/", "--timeout-secs", "3", "markets"]);
        let config = cli.client_config();
        assert_eq!(config.base_url, "http://localhost:8080/");
        assert_eq!(config.timeout, Some(Duration::from_secs(3)));
        assert!(config.credentials.is_complete());
    }
}
