//! # Account Repository
//!
//! File-based `AccountStore`. Accounts live in a single YAML ledger
//! (`{base}/accounts.yaml`) holding the email, generated uid and a salted
//! SHA-256 password hash. Sessions are bearer tokens kept in memory, so a
//! restart signs everyone out. Tokens expire after a fixed lifetime and
//! expired ones are pruned whenever a new session opens.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::connection::{write_atomically, JsonConnection};
use crate::storage::error::{AuthError, StoreError};
use crate::storage::traits::{AccountStore, Credential};

const MIN_PASSWORD_LEN: usize = 6;
const SESSION_TTL_DAYS: i64 = 30;

#[derive(Debug, Clone)]
struct Session {
    credential: Credential,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AccountRecord {
    uid: String,
    email: String,
    password_salt: String,
    password_hash: String,
    created_at: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct AccountLedger {
    #[serde(default)]
    accounts: Vec<AccountRecord>,
}

impl AccountLedger {
    fn find(&self, email: &str) -> Option<&AccountRecord> {
        self.accounts.iter().find(|a| a.email == email)
    }
}

/// Lower-cased, trimmed address with exactly one `@` and non-empty parts
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let parts = normalized.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    Some(normalized)
}

fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    let bytes = hasher.finalize();
    bytes.iter().map(|b| format!("{b:02x}")).collect::<String>()
}

/// YAML-ledger account repository with in-memory sessions
#[derive(Clone)]
pub struct AccountRepository {
    connection: JsonConnection,
    ledger_lock: Arc<Mutex<()>>,
    sessions: Arc<Mutex<HashMap<String, Session>>>,
    session_ttl: Duration,
}

impl AccountRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self::with_session_ttl(connection, Duration::days(SESSION_TTL_DAYS))
    }

    pub fn with_session_ttl(connection: JsonConnection, session_ttl: Duration) -> Self {
        Self {
            connection,
            ledger_lock: Arc::new(Mutex::new(())),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            session_ttl,
        }
    }

    fn load_ledger(&self) -> Result<AccountLedger, StoreError> {
        let path = self.connection.accounts_file_path();
        if !path.exists() {
            return Ok(AccountLedger::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    fn save_ledger(&self, ledger: &AccountLedger) -> Result<(), StoreError> {
        let path = self.connection.accounts_file_path();
        let content = serde_yaml::to_string(ledger)?;
        write_atomically(&path, content.as_bytes())?;
        Ok(())
    }

    async fn open_session(&self, account: &AccountRecord) -> Credential {
        let credential = Credential {
            uid: account.uid.clone(),
            email: account.email.clone(),
            token: Uuid::new_v4().simple().to_string(),
        };
        let now = Utc::now();
        let mut sessions = self.sessions.lock().await;

        let before = sessions.len();
        sessions.retain(|_, session| session.expires_at > now);
        if sessions.len() < before {
            debug!("Pruned {} expired sessions", before - sessions.len());
        }

        sessions.insert(
            credential.token.clone(),
            Session {
                credential: credential.clone(),
                expires_at: now + self.session_ttl,
            },
        );
        credential
    }
}

#[async_trait]
impl AccountStore for AccountRepository {
    async fn register(&self, email: &str, password: &str) -> Result<Credential, AuthError> {
        let email = normalize_email(email).ok_or(AuthError::InvalidIdentifier)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakCredential);
        }

        let account = {
            let _guard = self.ledger_lock.lock().await;
            let mut ledger = self.load_ledger()?;
            if ledger.find(&email).is_some() {
                warn!("Registration rejected, email already in use: {}", email);
                return Err(AuthError::AlreadyRegistered);
            }

            let salt = Uuid::new_v4().simple().to_string();
            let account = AccountRecord {
                uid: Uuid::new_v4().simple().to_string(),
                email: email.clone(),
                password_hash: hash_password(&salt, password),
                password_salt: salt,
                created_at: Utc::now().to_rfc3339(),
            };
            ledger.accounts.push(account.clone());
            self.save_ledger(&ledger)?;
            account
        };

        info!("Registered account {} for {}", account.uid, account.email);
        Ok(self.open_session(&account).await)
    }

    async fn login(&self, email: &str, password: &str) -> Result<Credential, AuthError> {
        let email = normalize_email(email).ok_or(AuthError::InvalidIdentifier)?;

        let account = {
            let _guard = self.ledger_lock.lock().await;
            let ledger = self.load_ledger()?;
            ledger.find(&email).cloned().ok_or(AuthError::NotRegistered)?
        };

        if hash_password(&account.password_salt, password) != account.password_hash {
            warn!("Wrong password for {}", email);
            return Err(AuthError::WrongCredential);
        }

        debug!("Opened session for {}", account.uid);
        Ok(self.open_session(&account).await)
    }

    async fn logout(&self, token: &str) -> Result<(), AuthError> {
        match self.sessions.lock().await.remove(token) {
            Some(session) => {
                debug!("Closed session for {}", session.credential.uid);
                Ok(())
            }
            None => Err(AuthError::InvalidSession),
        }
    }

    async fn current_session(&self, token: &str) -> Result<Option<Credential>, AuthError> {
        let mut sessions = self.sessions.lock().await;
        match sessions.get(token) {
            Some(session) if session.expires_at > Utc::now() => Ok(Some(session.credential.clone())),
            Some(_) => {
                debug!("Session expired");
                sessions.remove(token);
                Ok(None)
            }
            None => Ok(None),
        }
    }
}
