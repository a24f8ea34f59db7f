use ed25519_dalek::VerifyingKey;
use rand::RngCore;

use app_api::AppContext;

use crate::Notifier;

#[derive(Clone)]
pub struct HttpState {
    pub context: AppContext,
    pub api_token: String,
    pub notifier: Option<Notifier>,
    /// Public key that signs `/interactions` requests.
    pub discord_key: Option<VerifyingKey>,
}

impl HttpState {
    pub fn new(context: AppContext, api_token: String) -> Self {
        Self {
            context,
            api_token,
            notifier: None,
            discord_key: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Option<Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_discord_key(mut self, key: Option<VerifyingKey>) -> Self {
        self.discord_key = key;
        self
    }
}

pub fn generate_api_token() -> String {
    let mut bytes = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
}
