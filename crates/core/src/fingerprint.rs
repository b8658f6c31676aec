//! Cache keys for each tier's analysis database
//!
//! Keys are pure functions of version identifiers and lockfile content, so the
//! same environment always resolves to the same database file.

use crate::tier::Tier;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::sync::LazyLock;

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]+").unwrap());

/// Version identifiers supplied by the host environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVersions {
    /// Platform runtime release (e.g. "26")
    pub platform_release: String,

    /// Platform runtime internal build/version string
    pub platform_build: String,

    /// Host language version
    pub language_version: String,
}

fn sanitize(value: &str) -> String {
    let cleaned = UNSAFE_CHARS.replace_all(value.trim(), "_");
    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned.into_owned()
    }
}

pub fn platform_key(versions: &EnvironmentVersions) -> String {
    format!(
        "platform-{}_build-{}",
        sanitize(&versions.platform_release),
        sanitize(&versions.platform_build)
    )
}

pub fn language_key(versions: &EnvironmentVersions) -> String {
    format!(
        "{}_language-{}",
        platform_key(versions),
        sanitize(&versions.language_version)
    )
}

/// SHA-256 of `lock_content ‖ language_key`, URL-safe base64 without padding.
pub fn dependencies_key(lock_content: &[u8], language_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(lock_content);
    hasher.update(language_key.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// The derived key of every tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierKeys {
    pub platform: String,
    pub language: String,
    pub dependencies: String,
}

impl TierKeys {
    pub fn derive(versions: &EnvironmentVersions, lock_content: &[u8]) -> Self {
        let platform = platform_key(versions);
        let language = language_key(versions);
        let dependencies = dependencies_key(lock_content, &language);
        tracing::debug!(%platform, %language, %dependencies, "derived tier keys");
        Self {
            platform,
            language,
            dependencies,
        }
    }

    pub fn get(&self, tier: Tier) -> &str {
        match tier {
            Tier::Platform => &self.platform,
            Tier::LanguageCore => &self.language,
            Tier::ProjectDependencies => &self.dependencies,
        }
    }
}
