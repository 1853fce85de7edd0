//! Create-payment parameters and their validation.
//!
//! The gateway rejects incomplete payments with an opaque failure, so the
//! required fields are checked locally before anything is signed or sent.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value, json};

use crate::call::Parameters;
use crate::constants::params;
use crate::error::CallPaymentsMethodError;

/// Checks the create-payment parameters.
///
/// Rules: `destinationCurrency`, `price` and `orderId` are required, and
/// `price` must be numeric (a JSON number or a numeric string).
///
/// # Errors
///
/// Returns [`CallPaymentsMethodError`] whose details are a JSON object of
/// failed rules, e.g. `{"price":{"numeric":"The price must be numeric"}}`.
pub fn validate_create_payment(parameters: &Parameters) -> Result<(), CallPaymentsMethodError> {
    let mut failures = Map::new();

    for field in [params::DESTINATION_CURRENCY, params::PRICE, params::ORDER_ID] {
        if !is_present(parameters.get(field)) {
            failures.insert(
                field.to_owned(),
                json!({ "required": format!("The {field} is required") }),
            );
        }
    }

    if let Some(price) = parameters.get(params::PRICE) {
        if is_present(Some(price)) && !is_numeric(price) {
            failures.insert(
                params::PRICE.to_owned(),
                json!({ "numeric": format!("The {} must be numeric", params::PRICE) }),
            );
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(CallPaymentsMethodError::new(Value::Object(failures).to_string()))
    }
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(text)) => !text.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(text) => text
            .trim()
            .parse::<f64>()
            .is_ok_and(f64::is_finite),
        _ => false,
    }
}

/// Typed create-payment request.
///
/// Serializes to the gateway's wire names; unset optional fields are omitted.
///
/// ```rust
/// use bitbaypay::payment::CreatePayment;
/// use rust_decimal::Decimal;
///
/// let parameters = CreatePayment::new("PLN", Decimal::new(10050, 2), "order-17")
///     .with_source_currency("BTC")
///     .with_notifications_url("https://shop.example/notify")
///     .into_parameters();
///
/// assert_eq!(parameters["price"], serde_json::json!(100.5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayment {
    /// Currency the merchant receives.
    pub destination_currency: String,
    /// Amount to pay. Sent as a JSON number, or as a string when a number
    /// would lose digits.
    #[serde(serialize_with = "serialize_price")]
    pub price: Decimal,
    /// Merchant order identifier.
    pub order_id: String,
    /// Currency the customer pays in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_currency: Option<String>,
    /// Which side covers the fee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub covered_by: Option<String>,
    /// Whether the merchant keeps the source currency.
    #[serde(
        default,
        rename = "keep_source_currency",
        skip_serializing_if = "Option::is_none"
    )]
    pub keep_source_currency: Option<bool>,
    /// Redirect after success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_callback_url: Option<String>,
    /// Redirect after failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_callback_url: Option<String>,
    /// Status notification endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications_url: Option<String>,
}

impl CreatePayment {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        destination_currency: impl Into<String>,
        price: Decimal,
        order_id: impl Into<String>,
    ) -> Self {
        Self {
            destination_currency: destination_currency.into(),
            price,
            order_id: order_id.into(),
            source_currency: None,
            covered_by: None,
            keep_source_currency: None,
            success_callback_url: None,
            failure_callback_url: None,
            notifications_url: None,
        }
    }

    /// Sets the source currency.
    #[must_use]
    pub fn with_source_currency(mut self, currency: impl Into<String>) -> Self {
        self.source_currency = Some(currency.into());
        self
    }

    /// Sets who covers the fee.
    #[must_use]
    pub fn with_covered_by(mut self, covered_by: impl Into<String>) -> Self {
        self.covered_by = Some(covered_by.into());
        self
    }

    /// Sets whether the source currency is kept.
    #[must_use]
    pub const fn with_keep_source_currency(mut self, keep: bool) -> Self {
        self.keep_source_currency = Some(keep);
        self
    }

    /// Sets the success redirect.
    #[must_use]
    pub fn with_success_callback_url(mut self, url: impl Into<String>) -> Self {
        self.success_callback_url = Some(url.into());
        self
    }

    /// Sets the failure redirect.
    #[must_use]
    pub fn with_failure_callback_url(mut self, url: impl Into<String>) -> Self {
        self.failure_callback_url = Some(url.into());
        self
    }

    /// Sets the notification endpoint.
    #[must_use]
    pub fn with_notifications_url(mut self, url: impl Into<String>) -> Self {
        self.notifications_url = Some(url.into());
        self
    }

    /// Converts into wire parameters, in field order.
    #[must_use]
    pub fn into_parameters(self) -> Parameters {
        // A struct always serializes to an object; anything else leaves the
        // parameters empty and fails validation downstream.
        match serde_json::to_value(&self) {
            Ok(Value::Object(parameters)) => parameters,
            _ => Parameters::new(),
        }
    }
}

impl From<CreatePayment> for Parameters {
    fn from(payment: CreatePayment) -> Self {
        payment.into_parameters()
    }
}

/// Writes the price as a JSON number when that is exact, otherwise as its
/// decimal string.
fn serialize_price<S: Serializer>(price: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    let text = price.normalize().to_string();
    match Number::from_str(&text) {
        // Numbers go through f64, which keeps about 17 significant digits.
        Ok(number) if number.to_string() == text => number.serialize(serializer),
        _ => serializer.serialize_str(&text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(value: Value) -> Parameters {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    fn details(parameters: &Parameters) -> Value {
        let err = validate_create_payment(parameters).unwrap_err();
        serde_json::from_str(&err.details).unwrap()
    }

    #[test]
    fn test_valid_parameters() {
        let parameters = params(json!({
            "destinationCurrency": "PLN",
            "price": 100,
            "orderId": "randomstring",
        }));
        assert!(validate_create_payment(&parameters).is_ok());

        let parameters = params(json!({
            "destinationCurrency": "PLN",
            "price": "1000.50",
            "orderId": "randomstring",
        }));
        assert!(validate_create_payment(&parameters).is_ok());
    }

    #[test]
    fn test_empty_parameters_fail_every_required_rule() {
        let details = details(&Parameters::new());
        assert!(details["destinationCurrency"]["required"].is_string());
        assert!(details["price"]["required"].is_string());
        assert!(details["orderId"]["required"].is_string());
    }

    #[test]
    fn test_missing_price_and_order_id() {
        let details = details(&params(json!({"destinationCurrency": "PLN"})));
        assert!(details.get("destinationCurrency").is_none());
        assert_eq!(details["price"]["required"], "The price is required");
        assert_eq!(details["orderId"]["required"], "The orderId is required");
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let details = details(&params(json!({
            "destinationCurrency": "  ",
            "price": null,
            "orderId": [],
        })));
        assert_eq!(details.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_price_must_be_numeric() {
        for price in [json!("abc"), json!("inf"), json!(true), json!({"amount": 1})] {
            let details = details(&params(json!({
                "destinationCurrency": "PLN",
                "price": price,
                "orderId": "order-1",
            })));
            assert_eq!(details["price"]["numeric"], "The price must be numeric");
        }
    }

    #[test]
    fn test_into_parameters_order_and_names() {
        let parameters = CreatePayment::new("PLN", Decimal::new(100, 0), "order-1")
            .with_keep_source_currency(true)
            .with_covered_by("MERCHANT")
            .into_parameters();

        let keys: Vec<&str> = parameters.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            [
                "destinationCurrency",
                "price",
                "orderId",
                "coveredBy",
                "keep_source_currency"
            ]
        );
        assert_eq!(
            Value::Object(parameters.clone()).to_string(),
            r#"{"destinationCurrency":"PLN","price":100,"orderId":"order-1","coveredBy":"MERCHANT","keep_source_currency":true}"#
        );
        assert!(validate_create_payment(&parameters).is_ok());
    }

    #[test]
    fn test_deserialize_from_wire_names() {
        let payment: CreatePayment = serde_json::from_value(json!({
            "destinationCurrency": "PLN",
            "price": "19.99",
            "orderId": "order-2",
            "keep_source_currency": false,
        }))
        .unwrap();
        assert_eq!(payment.price, Decimal::new(1999, 2));
        assert_eq!(payment.keep_source_currency, Some(false));
        assert!(payment.notifications_url.is_none());
    }

    #[test]
    fn test_long_price_keeps_every_digit() {
        let price = Decimal::from_str("1234567890.123456789").unwrap();
        let parameters = CreatePayment::new("BTC", price, "o").into_parameters();
        assert_eq!(
            Value::Object(parameters.clone()).to_string(),
            r#"{"destinationCurrency":"BTC","price":"1234567890.123456789","orderId":"o"}"#
        );
        assert!(validate_create_payment(&parameters).is_ok());
    }

    #[test]
    fn test_price_is_a_json_number() {
        let parameters = CreatePayment::new("EUR", Decimal::new(1250, 2), "o").into_parameters();
        assert_eq!(parameters["price"], json!(12.5));
    }
}
