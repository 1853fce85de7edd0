//! Gateway endpoint, header, envelope and parameter names.

/// Production REST endpoint. Method paths are appended verbatim.
pub const BASE_URL: &str = "https://api.bitbaypay.com/rest/bitbaypay/";

/// Header carrying the public key.
pub const API_KEY_HEADER: &str = "API-Key";

/// Header carrying the hex HMAC-SHA-512 signature.
pub const API_HASH_HEADER: &str = "API-Hash";

/// Header carrying the per-request UUID.
pub const OPERATION_ID_HEADER: &str = "operation-id";

/// Header carrying the Unix timestamp the signature was computed for.
pub const REQUEST_TIMESTAMP_HEADER: &str = "Request-Timestamp";

/// Header carrying the content type.
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";

/// Content type sent with every request.
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// `POST` create payment, `GET payments/{id}` fetch payment.
pub const METHOD_PAYMENTS: &str = "payments";

/// `GET` search payments.
pub const METHOD_PAYMENTS_SEARCH: &str = "payments/search";

/// `GET` store currency settings.
pub const METHOD_STORES_CURRENCIES_SETTINGS: &str = "stores/currenciesSettings";

/// `GET` store markets.
pub const METHOD_STORES_MARKETS: &str = "stores/markets";

// Envelope keys and values.
pub(crate) const STATUS: &str = "status";
pub(crate) const DATA: &str = "data";
pub(crate) const ERRORS: &str = "errors";
pub(crate) const REASON: &str = "reason";
pub(crate) const STATUS_OK: &str = "Ok";
pub(crate) const STATUS_FAIL: &str = "Fail";

/// Reason used when a `Fail` envelope carries no usable `errors`.
pub const UNKNOWN_REASON: &str = "UNKNOWN_REASON";

/// Reason used when the envelope status is missing or unrecognized.
pub const UNKNOWN_STATUS: &str = "UNKNOWN_STATUS";

/// Create-payment parameter names.
pub mod params {
    /// Currency the merchant receives. Required.
    pub const DESTINATION_CURRENCY: &str = "destinationCurrency";
    /// Payment amount. Required, numeric.
    pub const PRICE: &str = "price";
    /// Merchant order identifier. Required.
    pub const ORDER_ID: &str = "orderId";
    /// Currency the customer pays in.
    pub const SOURCE_CURRENCY: &str = "sourceCurrency";
    /// Which side covers the fee.
    pub const COVERED_BY: &str = "coveredBy";
    /// Whether the merchant keeps the source currency.
    pub const KEEP_SOURCE_CURRENCY: &str = "keep_source_currency";
    /// Redirect after a successful payment.
    pub const SUCCESS_CALLBACK_URL: &str = "successCallbackUrl";
    /// Redirect after a failed payment.
    pub const FAILURE_CALLBACK_URL: &str = "failureCallbackUrl";
    /// Endpoint receiving payment status notifications.
    pub const NOTIFICATIONS_URL: &str = "notificationsUrl";
}
