use anyhow::Result;
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use crate::ai::sigv4::AwsCredentials;

const KEYRING_SERVICE: &str = "riposte";

/// A secret the provider clients need
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Secret {
    OpenRouterApiKey,
    AwsAccessKeyId,
    AwsSecretAccessKey,
    AwsSessionToken,
}

impl Secret {
    pub const ALL: [Secret; 4] = [
        Secret::OpenRouterApiKey,
        Secret::AwsAccessKeyId,
        Secret::AwsSecretAccessKey,
        Secret::AwsSessionToken,
    ];

    pub fn env_var(self) -> &'static str {
        match self {
            Secret::OpenRouterApiKey => "OPENROUTER_API_KEY",
            Secret::AwsAccessKeyId => "AWS_ACCESS_KEY_ID",
            Secret::AwsSecretAccessKey => "AWS_SECRET_ACCESS_KEY",
            Secret::AwsSessionToken => "AWS_SESSION_TOKEN",
        }
    }

    /// Keyring user name, also used to name the fallback file
    fn key(self) -> &'static str {
        match self {
            Secret::OpenRouterApiKey => "openrouter-api-key",
            Secret::AwsAccessKeyId => "aws-access-key-id",
            Secret::AwsSecretAccessKey => "aws-secret-access-key",
            Secret::AwsSessionToken => "aws-session-token",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Secret::OpenRouterApiKey => "OpenRouter API key",
            Secret::AwsAccessKeyId => "AWS access key id",
            Secret::AwsSecretAccessKey => "AWS secret access key",
            Secret::AwsSessionToken => "AWS session token",
        }
    }
}

/// Debug information about credential storage backends
#[derive(Debug, Clone)]
pub struct CredentialDebugInfo {
    pub keyring_available: bool,
    pub file_dir: PathBuf,
    /// (secret, env var set, fallback file exists)
    pub secrets: Vec<(Secret, bool, bool)>,
}

impl std::fmt::Display for CredentialDebugInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Credential Storage Status:")?;
        writeln!(
            f,
            "  Keyring: {}",
            if self.keyring_available {
                "available"
            } else {
                "unavailable"
            }
        )?;
        writeln!(f, "  File fallback: {}", self.file_dir.display())?;
        for (secret, env_set, file_exists) in &self.secrets {
            writeln!(
                f,
                "  {} ({}): env {}, file {}",
                secret.description(),
                secret.env_var(),
                if *env_set { "set" } else { "not set" },
                if *file_exists { "present" } else { "absent" }
            )?;
        }
        Ok(())
    }
}

pub struct CredentialStore {
    dir: PathBuf,
    /// Off for stores confined to a directory, so they never read or
    /// write the user's real keyring entries
    use_keyring: bool,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore {
    pub fn new() -> Self {
        let dir = crate::config::Config::config_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            dir,
            use_keyring: true,
        }
    }

    #[cfg(test)]
    fn with_dir(dir: PathBuf) -> Self {
        Self {
            dir,
            use_keyring: false,
        }
    }

    fn keyring_entry(&self, user: &str) -> Option<keyring::Entry> {
        if !self.use_keyring {
            return None;
        }
        keyring::Entry::new(KEYRING_SERVICE, user).ok()
    }

    fn file_path(&self, secret: Secret) -> PathBuf {
        self.dir.join(format!(".{}", secret.key()))
    }

    /// Get diagnostic info about credential storage backend
    pub fn debug_info(&self) -> CredentialDebugInfo {
        let keyring_available = self
            .keyring_entry("__riposte_check__")
            .is_some_and(|entry| {
                entry.set_password("__test__").is_ok()
                    && entry.get_password().is_ok()
                    && entry.delete_credential().is_ok()
            });

        let secrets = Secret::ALL
            .iter()
            .map(|&s| (s, env_get(s).is_some(), self.file_path(s).exists()))
            .collect();

        CredentialDebugInfo {
            keyring_available,
            file_dir: self.dir.clone(),
            secrets,
        }
    }

    fn keyring_get(&self, secret: Secret) -> Option<String> {
        self.keyring_entry(secret.key())?.get_password().ok()
    }

    fn keyring_set(&self, secret: Secret, value: &str) -> bool {
        self.keyring_entry(secret.key())
            .is_some_and(|entry| entry.set_password(value).is_ok())
    }

    fn file_get(&self, secret: Secret) -> Option<String> {
        fs::read_to_string(self.file_path(secret))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Write a secret to its fallback file (owner read/write only on unix)
    fn file_set(&self, secret: Secret, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.file_path(secret);

        #[cfg(unix)]
        {
            let mut file = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&path)?;
            file.write_all(value.as_bytes())?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&path, value)?;
        }

        Ok(())
    }

    /// Resolve a secret: environment, then keyring, then file fallback
    pub fn get(&self, secret: Secret) -> Option<String> {
        env_get(secret)
            .or_else(|| self.keyring_get(secret))
            .or_else(|| self.file_get(secret))
    }

    /// Store a secret in the keyring, or the file fallback if the keyring
    /// does not hold it afterwards
    pub fn set(&self, secret: Secret, value: &str) -> Result<()> {
        if self.keyring_set(secret, value) && self.keyring_get(secret).is_some() {
            return Ok(());
        }

        eprintln!(
            "Note: Keyring unavailable, storing {} in {}",
            secret.description(),
            self.file_path(secret).display()
        );
        self.file_set(secret, value)
    }

    pub fn delete(&self, secret: Secret) {
        if let Some(entry) = self.keyring_entry(secret.key()) {
            let _ = entry.delete_credential();
        }
        let _ = fs::remove_file(self.file_path(secret));
    }

    pub fn openrouter_api_key(&self) -> Option<String> {
        self.get(Secret::OpenRouterApiKey)
    }

    /// Static AWS credentials; both key id and secret are required
    pub fn aws_credentials(&self) -> Option<AwsCredentials> {
        Some(AwsCredentials {
            access_key_id: self.get(Secret::AwsAccessKeyId)?,
            secret_access_key: self.get(Secret::AwsSecretAccessKey)?,
            session_token: self.get(Secret::AwsSessionToken),
        })
    }
}

fn env_get(secret: Secret) -> Option<String> {
    env::var(secret.env_var())
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
