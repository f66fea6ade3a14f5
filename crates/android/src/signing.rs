//! Signing-config resolution
//!
//! The Carrot build signs release builds with the debug keystore until a real
//! release keystore is provisioned. That fallback is modelled here: release
//! resolves to a declared release config when one exists, otherwise to debug.

use serde::Serialize;

/// Android build type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildType {
    /// Debug build
    Debug,
    /// Release build
    Release,
}

impl BuildType {
    /// Build-type name as Gradle spells it
    pub fn name(&self) -> &'static str {
        match self {
            BuildType::Debug => "debug",
            BuildType::Release => "release",
        }
    }
}

/// A named signing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SigningConfig {
    /// Config name (`debug` or a declared release config)
    pub name: String,
}

impl SigningConfig {
    /// The implicit debug signing config every Android project has
    pub fn debug() -> Self {
        Self {
            name: "debug".to_string(),
        }
    }
}

/// The set of signing configs declared by the project
#[derive(Debug, Clone)]
pub struct SigningConfigs {
    debug: SigningConfig,
    release: Option<SigningConfig>,
}

impl Default for SigningConfigs {
    fn default() -> Self {
        Self {
            debug: SigningConfig::debug(),
            release: None,
        }
    }
}

impl SigningConfigs {
    /// Configs with only the implicit debug keystore declared
    pub fn debug_only() -> Self {
        Self::default()
    }

    /// Declare a release signing config
    pub fn with_release(mut self, release: SigningConfig) -> Self {
        self.release = Some(release);
        self
    }

    /// Resolve the signing config for a build type
    ///
    /// Release falls back to the debug config when no release config is
    /// declared, matching the project's build file.
    pub fn for_build_type(&self, build_type: BuildType) -> &SigningConfig {
        match build_type {
            BuildType::Debug => &self.debug,
            BuildType::Release => self.release.as_ref().unwrap_or(&self.debug),
        }
    }

    /// Whether release builds fall back to the debug keystore
    pub fn release_uses_debug_fallback(&self) -> bool {
        self.release.is_none()
    }
}
