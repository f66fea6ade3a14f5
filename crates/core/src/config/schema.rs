//! Configuration schema definitions
//!
//! Tool configuration for resolving and generating Android build resources.
//! SDK and versioning metadata is passthrough: the hosting toolchain (the
//! Flutter Gradle plugin) owns those values, so every field is optional and
//! `None` means "supplied by the toolchain".

use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Application identity
    #[serde(default)]
    pub app: AppConfig,

    /// Injected SDK/versioning passthrough values
    #[serde(default)]
    pub sdk: SdkConfig,

    /// Resource generation paths
    #[serde(default)]
    pub resources: ResourcesConfig,
}

/// Application identity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Android namespace
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Application id
    #[serde(default = "default_namespace")]
    pub application_id: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            application_id: default_namespace(),
        }
    }
}

fn default_namespace() -> String {
    "com.example.carrot".to_string()
}

/// SDK and versioning metadata injected by the hosting toolchain
///
/// These are opaque passthrough values. The tool reports them but never
/// computes or defaults them.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SdkConfig {
    /// Compile SDK version
    pub compile_sdk: Option<u32>,

    /// Minimum SDK version
    pub min_sdk: Option<u32>,

    /// Target SDK version
    pub target_sdk: Option<u32>,

    /// Application version code
    pub version_code: Option<u32>,

    /// Application version name
    pub version_name: Option<String>,

    /// NDK version string
    pub ndk_version: Option<String>,
}

impl SdkConfig {
    /// Whether any passthrough value was provided
    pub fn any_set(&self) -> bool {
        self.compile_sdk.is_some()
            || self.min_sdk.is_some()
            || self.target_sdk.is_some()
            || self.version_code.is_some()
            || self.version_name.is_some()
            || self.ndk_version.is_some()
    }
}

/// Resource generation paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesConfig {
    /// Path to the local properties file, relative to the project root
    #[serde(default = "default_properties_file")]
    pub properties_file: String,

    /// Android `res` directory the generated values file is written under
    #[serde(default = "default_res_dir")]
    pub res_dir: String,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            properties_file: default_properties_file(),
            res_dir: default_res_dir(),
        }
    }
}

fn default_properties_file() -> String {
    "local.properties".to_string()
}

fn default_res_dir() -> String {
    "app/src/main/res".to_string()
}
