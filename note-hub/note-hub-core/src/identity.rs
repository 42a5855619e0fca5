//! Request identity. The identity is whatever string the client put in the
//! identity header; nothing is verified cryptographically.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::error::{NoteError, Result};

/// Unverified owner key taken verbatim from a request header.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identity(String);

impl Identity {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Take the header value as-is. `None` only when the header is missing.
pub fn extract_identity(raw_header: Option<&str>) -> Option<Identity> {
    raw_header.map(Identity::new)
}

/// Decides whether a claimed identity may use the notes API at all.
#[async_trait]
pub trait IdentityCheck: Send + Sync {
    async fn authenticate(&self, claimed: Option<Identity>) -> Result<Identity>;
}

fn present(claimed: Option<Identity>) -> Result<Identity> {
    match claimed {
        Some(id) if !id.is_empty() => Ok(id),
        _ => {
            warn!("request without identity rejected");
            Err(NoteError::Unauthenticated)
        }
    }
}

/// Accepts any non-empty identity.
#[derive(Clone, Copy, Debug, Default)]
pub struct PresenceCheck;

#[async_trait]
impl IdentityCheck for PresenceCheck {
    async fn authenticate(&self, claimed: Option<Identity>) -> Result<Identity> {
        present(claimed)
    }
}

/// `{ "admins": ["name", ...] }`
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AdminList {
    pub admins: Vec<String>,
}

impl AdminList {
    pub async fn load(path: &std::path::Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| NoteError::io(path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| NoteError::parse(path, e))
    }

    pub fn is_admin(&self, identity: &Identity) -> bool {
        self.admins.iter().any(|a| a == identity.as_str())
    }
}

/// Accepts only identities listed in the admins document. The document is
/// re-read on every check.
#[derive(Clone, Debug)]
pub struct AdminListCheck {
    path: PathBuf,
}

impl AdminListCheck {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn is_admin(&self, identity: &Identity) -> Result<bool> {
        Ok(AdminList::load(&self.path).await?.is_admin(identity))
    }
}

#[async_trait]
impl IdentityCheck for AdminListCheck {
    async fn authenticate(&self, claimed: Option<Identity>) -> Result<Identity> {
        let identity = present(claimed)?;
        if self.is_admin(&identity).await? {
            Ok(identity)
        } else {
            warn!(identity = %identity, "identity not in admin list");
            Err(NoteError::Unauthenticated)
        }
    }
}
