#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::iter;
use std::sync::Mutex;

use age::secrecy::SecretString;
use age::x25519;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use orgkey_core::{CryptoProvider, OrgKeyError, Result, SymmetricKey};
use zeroize::Zeroizing;

/// A collaborator call, as observed by [`ScriptedCrypto`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    PrivateKey,
    ProviderKey(String),
    AsymmetricDecrypt { cipher_text: String, key: String },
    SymmetricDecrypt { cipher_text: String, key: Vec<u8> },
}

/// In-memory collaborator that answers from fixed tables and records every call.
#[derive(Default)]
pub struct ScriptedCrypto {
    pub private_key: Option<String>,
    pub asymmetric: HashMap<String, Vec<u8>>,
    pub provider_keys: HashMap<String, Vec<u8>>,
    pub symmetric: HashMap<String, Vec<u8>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedCrypto {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_private_key(mut self, key: &str) -> Self {
        self.private_key = Some(key.to_string());
        self
    }

    pub fn with_asymmetric(mut self, cipher_text: &str, plaintext: &[u8]) -> Self {
        self.asymmetric
            .insert(cipher_text.to_string(), plaintext.to_vec());
        self
    }

    pub fn with_provider_key(mut self, provider_id: &str, key: &[u8]) -> Self {
        self.provider_keys
            .insert(provider_id.to_string(), key.to_vec());
        self
    }

    pub fn with_symmetric(mut self, cipher_text: &str, plaintext: &[u8]) -> Self {
        self.symmetric
            .insert(cipher_text.to_string(), plaintext.to_vec());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

#[async_trait]
impl CryptoProvider for ScriptedCrypto {
    type PrivateKey = String;

    async fn private_key(&self) -> Result<Option<String>> {
        self.record(Call::PrivateKey);
        Ok(self.private_key.clone())
    }

    async fn provider_key(&self, provider_id: &str) -> Result<SymmetricKey> {
        self.record(Call::ProviderKey(provider_id.to_string()));
        let bytes = self
            .provider_keys
            .get(provider_id)
            .ok_or_else(|| OrgKeyError::NotFound(provider_id.to_string()))?;
        SymmetricKey::from_bytes(bytes.clone())
    }

    async fn asymmetric_decrypt(
        &self,
        cipher_text: &str,
        key: &String,
    ) -> Result<Zeroizing<Vec<u8>>> {
        self.record(Call::AsymmetricDecrypt {
            cipher_text: cipher_text.to_string(),
            key: key.clone(),
        });
        self.asymmetric
            .get(cipher_text)
            .cloned()
            .map(Zeroizing::new)
            .ok_or_else(|| OrgKeyError::Crypto(format!("cannot decrypt {}", cipher_text)))
    }

    async fn symmetric_decrypt(
        &self,
        cipher_text: &str,
        key: &SymmetricKey,
    ) -> Result<Zeroizing<Vec<u8>>> {
        self.record(Call::SymmetricDecrypt {
            cipher_text: cipher_text.to_string(),
            key: key.as_bytes().to_vec(),
        });
        self.symmetric
            .get(cipher_text)
            .cloned()
            .map(Zeroizing::new)
            .ok_or_else(|| OrgKeyError::Crypto(format!("cannot decrypt {}", cipher_text)))
    }
}

/// 32 bytes of recognizable key material.
pub fn key_bytes(fill: u8) -> Vec<u8> {
    vec![fill; 32]
}

/// Encrypt `plaintext` to an X25519 recipient, base64 encoded.
pub fn seal_to_recipient(plaintext: &[u8], recipient: &x25519::Recipient) -> String {
    let encryptor = age::Encryptor::with_recipients(iter::once(recipient as &dyn age::Recipient))
        .expect("encryptor should build");
    finish(encryptor, plaintext)
}

/// Encrypt `plaintext` under a provider key, base64 encoded.
pub fn seal_with_key(plaintext: &[u8], key: &SymmetricKey) -> String {
    let passphrase = key.to_base64();
    let encryptor =
        age::Encryptor::with_user_passphrase(SecretString::from(passphrase.to_string()));
    finish(encryptor, plaintext)
}

fn finish(encryptor: age::Encryptor, plaintext: &[u8]) -> String {
    let mut encrypted = Vec::new();
    let mut writer = encryptor
        .wrap_output(&mut encrypted)
        .expect("wrap should succeed");
    writer.write_all(plaintext).expect("write should succeed");
    writer.finish().expect("finish should succeed");
    STANDARD.encode(encrypted)
}
