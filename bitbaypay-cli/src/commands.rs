//! Dispatch of parsed commands to the gateway.

use bitbaypay::{BitBayPay, Error, Transport};
use serde_json::Value;

use crate::args::{Command, into_parameters};

/// Runs `command` and returns the gateway's `data` payload.
///
/// # Errors
///
/// Returns the gateway [`Error`] unchanged.
pub async fn execute<T: Transport>(
    client: &BitBayPay<T>,
    command: Command,
) -> Result<Value, Error> {
    match command {
        Command::CreatePayment(args) => {
            let payment = args.into_payment();
            tracing::info!(order_id = %payment.order_id, "Creating payment");
            client.create_payment(payment.into_parameters()).await
        }
        Command::GetPayment { payment_id } => client.get_payment(&payment_id).await,
        Command::CurrenciesSettings => client.get_currencies_settings().await,
        Command::Markets => client.get_markets().await,
        Command::SearchPayments { params } => {
            client.search_payments(into_parameters(params)).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Cli;
    use clap::Parser;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cli(server: &MockServer, args: &[&str]) -> Cli {
        let base_url = format!("{}/", server.uri());
        let mut argv = vec![
            "bitbaypay",
            "--public-key",
            "public-key",
            "--private-key",
            "private-key",
            "--base-url",
            base_url.as_str(),
        ];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[tokio::test]
    async fn test_get_payment_command() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/payments/7a1b"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "Ok",
                "data": {"paymentId": "7a1b", "status": "PAID"},
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let cli = cli(&mock_server, &["get-payment", "7a1b"]);
        let client = cli.client_config().build();
        let data = execute(&client, cli.command).await.unwrap();
        assert_eq!(data["status"], "PAID");
    }

    #[tokio::test]
    async fn test_search_payments_command() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/payments/search"))
            .and(query_param("status", "PAID"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "Ok",
                "data": {"page": []},
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let cli = cli(&mock_server, &["search-payments", "--param", "status=PAID"]);
        let client = cli.client_config().build();
        let data = execute(&client, cli.command).await.unwrap();
        assert_eq!(data, json!({"page": []}));
    }

    #[tokio::test]
    async fn test_command_failure_is_returned() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stores/markets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "Fail",
                "errors": {"reason": "AUTHENTICATION_FAILED"},
            })))
            .mount(&mock_server)
            .await;

        let cli = cli(&mock_server, &["markets"]);
        let client = cli.client_config().build();
        let err = execute(&client, cli.command).await.unwrap_err();
        assert_eq!(err.reason(), Some("AUTHENTICATION_FAILED"));
    }
}
