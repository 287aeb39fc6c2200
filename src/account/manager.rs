use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use base32::Alphabet;
use tracing::{error, info, warn};

use crate::config::ConfigStore;
use crate::otp;

/// Codes are six decimal digits, derived over a 30-second window.
pub const CODE_DIGITS: u32 = 6;
pub const TIME_STEP_SECS: u64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Account {
    name: String,
    secret: String,
}

/// Owns the single configured account and derives the current code.
///
/// The stored secret is kept exactly as supplied; normalization to the
/// base-32 alphabet happens at derivation time only, so lowercase input and
/// stray separators round-trip through the configuration file untouched.
pub struct AccountManager {
    settings: Arc<ConfigStore>,
    account: Mutex<Account>,
}

impl AccountManager {
    pub fn new(settings: Arc<ConfigStore>) -> Self {
        let account = Account {
            name: settings.get("totp.account_name", String::new()),
            secret: settings.get("totp.secret", String::new()),
        };
        Self {
            settings,
            account: Mutex::new(account),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Account> {
        self.account.lock().unwrap_or_else(|poisoned| {
            warn!("Account lock poisoned; continuing");
            poisoned.into_inner()
        })
    }

    /// Replace the configured account. Rejects empty arguments without any
    /// state change; otherwise both fields are written to the store before a
    /// save is triggered.
    pub fn set_account(&self, name: &str, secret: &str) -> bool {
        if name.is_empty() || secret.is_empty() {
            warn!("Account name and secret cannot be empty");
            return false;
        }

        {
            let mut account = self.lock();
            account.name = name.to_owned();
            account.secret = secret.to_owned();
        }

        self.persist();
        info!(account = name, "TOTP account set");
        true
    }

    /// Forget the configured account and persist the cleared fields.
    pub fn clear_account(&self) {
        {
            let mut account = self.lock();
            account.name.clear();
            account.secret.clear();
        }
        self.persist();
    }

    fn persist(&self) {
        let account = self.lock().clone();
        self.settings.set("totp.account_name", account.name);
        self.settings.set("totp.secret", account.secret);
        self.settings.save();
    }

    pub fn get_account_name(&self) -> String {
        self.lock().name.clone()
    }

    /// Derive the code for the current 30-second window, or `None` when no
    /// account is configured or the secret does not decode.
    pub fn generate_code(&self) -> Option<String> {
        self.generate_code_at(unix_now())
    }

    /// Derive the code for the window containing `unix_secs`.
    pub fn generate_code_at(&self, unix_secs: u64) -> Option<String> {
        let (name, secret) = {
            let account = self.lock();
            (account.name.clone(), account.secret.clone())
        };

        if name.is_empty() || secret.is_empty() {
            warn!("No TOTP account configured");
            return None;
        }

        let normalized = normalize_base32(&secret);
        let key = match base32::decode(Alphabet::Rfc4648 { padding: false }, &normalized) {
            Some(key) if !key.is_empty() => key,
            _ => {
                error!(account = %name, "TOTP secret does not decode as base-32");
                return None;
            }
        };

        Some(otp::derive_code(
            &key,
            unix_secs / TIME_STEP_SECS,
            CODE_DIGITS,
        ))
    }

    /// Seconds until the current window expires, for watch-mode display.
    pub fn seconds_remaining(&self) -> u64 {
        TIME_STEP_SECS - (unix_now() % TIME_STEP_SECS)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Uppercase and drop every character outside the unpadded base-32 alphabet
/// (`A-Z`, `2-7`).
fn normalize_base32(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| match c {
            'a'..='z' => Some(c.to_ascii_uppercase()),
            'A'..='Z' | '2'..='7' => Some(c),
            _ => None,
        })
        .collect()
}
