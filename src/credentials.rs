//! Per-user ClickUp tokens.
//!
//! Applications that store a ClickUp token per user keep it encrypted at
//! rest. [`TokenOwner`] wraps that stored value and hands out a [`Builder`]
//! whose client is authenticated as that user.

use crate::client::ClickUpClient;
use crate::error::Result;
use crate::support::builder::Builder;

/// Symmetric encryption of a stored token.
pub trait Encrypter {
    fn encrypt(&self, plain: &str) -> Result<String>;

    fn decrypt(&self, cipher: &str) -> Result<String>;
}

/// Anything that can produce an API token.
pub trait CredentialStore {
    fn token(&self) -> Result<Option<String>>;
}

/// The encrypted token of one user, plus the builder made from it.
#[derive(Debug)]
pub struct TokenOwner<E> {
    encrypter: E,
    encrypted: Option<String>,
    client: ClickUpClient,
    builder: Option<Builder>,
}

impl<E: Encrypter> TokenOwner<E> {
    /// `client` supplies the base URL and HTTP settings; its token, if
    /// any, is replaced by the owner's.
    pub fn new(encrypter: E, client: ClickUpClient) -> Self {
        Self {
            encrypter,
            encrypted: None,
            client,
            builder: None,
        }
    }

    /// Wrap an already encrypted value, as loaded from storage.
    #[must_use]
    pub fn with_encrypted(mut self, encrypted: Option<String>) -> Self {
        self.encrypted = encrypted;
        self.builder = None;
        self
    }

    /// The value to persist.
    #[must_use]
    pub fn encrypted(&self) -> Option<&str> {
        self.encrypted.as_deref()
    }

    /// Encrypt and store a new token, dropping any builder made with the
    /// old one.
    pub fn set_token(&mut self, token: Option<&str>) -> Result<()> {
        self.builder = None;
        self.encrypted = token.map(|token| self.encrypter.encrypt(token)).transpose()?;
        Ok(())
    }

    /// The decrypted token.
    pub fn token(&self) -> Result<Option<String>> {
        self.encrypted
            .as_deref()
            .map(|cipher| self.encrypter.decrypt(cipher))
            .transpose()
    }

    /// Root builder authenticated as this owner, built once.
    pub fn clickup(&mut self) -> Result<&Builder> {
        let builder = match self.builder.take() {
            Some(builder) => builder,
            None => {
                let client = self.client.clone().with_credentials(&*self)?;

                tracing::debug!(authenticated = client.has_token(), "built ClickUp builder");
                Builder::for_client(client)
            }
        };

        Ok(self.builder.insert(builder))
    }

    /// The authenticated client.
    pub fn client(&mut self) -> Result<Option<&ClickUpClient>> {
        Ok(self.clickup()?.client())
    }
}

impl<E: Encrypter> CredentialStore for TokenOwner<E> {
    fn token(&self) -> Result<Option<String>> {
        TokenOwner::token(self)
    }
}
