/// Payment gateway configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Secret API key, sent as a bearer token.
    pub api_key: String,
    /// `sandbox` or `live`; selects the base URL.
    pub environment: String,
    /// URL the gateway redirects buyers to after checkout.
    pub callback_url: String,
    /// Shared secret for webhook signature verification. When unset,
    /// callback signatures are not checked.
    pub webhook_secret: Option<String>,
}

impl GatewayConfig {
    /// Read gateway settings from the environment.
    ///
    /// | Env Var                  | Default                              |
    /// |--------------------------|--------------------------------------|
    /// | `FEDAPAY_API_KEY`        | (required)                           |
    /// | `FEDAPAY_ENVIRONMENT`    | `sandbox`                            |
    /// | `PAYMENT_CALLBACK_URL`   | `http://localhost:3000/payment/callback` |
    /// | `FEDAPAY_WEBHOOK_SECRET` | (unset)                              |
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("FEDAPAY_API_KEY").expect("FEDAPAY_API_KEY must be set");

        let environment =
            std::env::var("FEDAPAY_ENVIRONMENT").unwrap_or_else(|_| "sandbox".into());

        let callback_url = std::env::var("PAYMENT_CALLBACK_URL")
            .unwrap_or_else(|_| "http://localhost:3000/payment/callback".into());

        let webhook_secret = std::env::var("FEDAPAY_WEBHOOK_SECRET").ok();

        Self {
            api_key,
            environment,
            callback_url,
            webhook_secret,
        }
    }

    /// Base API URL for the configured environment.
    pub fn base_url(&self) -> &'static str {
        if self.environment == "live" {
            "https://api.fedapay.com/v1"
        } else {
            "https://api-sandbox.fedapay.com/v1"
        }
    }
}
