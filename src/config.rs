use crate::domain::{TagPattern, Tier};
use crate::error::{ResolverError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "versionresolver.toml";

/// Represents the complete configuration for version-resolver.
///
/// Contains the commit classification table, tag pattern, tier routing names and behavior options.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub conventional_commits: ConventionalCommitsConfig,

    #[serde(default)]
    pub tags: TagsConfig,

    #[serde(default)]
    pub routing: RoutingConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Returns the default commit types that suggest a minor bump.
fn default_minor_types() -> Vec<String> {
    vec!["feat".to_string()]
}

/// Returns the default commit types that suggest a patch bump.
fn default_patch_types() -> Vec<String> {
    vec![
        "fix".to_string(),
        "docs".to_string(),
        "style".to_string(),
        "refactor".to_string(),
        "perf".to_string(),
        "test".to_string(),
        "build".to_string(),
        "ci".to_string(),
        "chore".to_string(),
    ]
}

/// Returns the default list of breaking change indicators.
fn default_breaking_change_indicators() -> Vec<String> {
    vec![
        "BREAKING CHANGE:".to_string(),
        "BREAKING-CHANGE:".to_string(),
    ]
}

/// Configuration for conventional commit analysis.
///
/// Maps commit types onto the bump they suggest. Breaking changes always suggest major.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ConventionalCommitsConfig {
    #[serde(default = "default_minor_types")]
    pub minor_types: Vec<String>,

    #[serde(default = "default_patch_types")]
    pub patch_types: Vec<String>,

    #[serde(default = "default_breaking_change_indicators")]
    pub breaking_change_indicators: Vec<String>,
}

impl Default for ConventionalCommitsConfig {
    fn default() -> Self {
        ConventionalCommitsConfig {
            minor_types: default_minor_types(),
            patch_types: default_patch_types(),
            breaking_change_indicators: default_breaking_change_indicators(),
        }
    }
}

fn default_tag_pattern() -> String {
    "v{version}".to_string()
}

/// Configuration for tag naming.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TagsConfig {
    #[serde(default = "default_tag_pattern")]
    pub pattern: String,
}

impl TagsConfig {
    pub fn tag_pattern(&self) -> Result<TagPattern> {
        TagPattern::new(self.pattern.clone())
    }
}

impl Default for TagsConfig {
    fn default() -> Self {
        TagsConfig {
            pattern: default_tag_pattern(),
        }
    }
}

/// Target names for each promotion tier of one publishing destination.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TierTargets {
    pub testing: String,
    pub staging: String,
    pub release: String,
}

impl TierTargets {
    fn with_prefix(prefix: &str) -> Self {
        TierTargets {
            testing: format!("{}-testing", prefix),
            staging: format!("{}-staging", prefix),
            release: format!("{}-release", prefix),
        }
    }

    pub fn target(&self, tier: Tier) -> &str {
        match tier {
            Tier::Testing => &self.testing,
            Tier::Staging => &self.staging,
            Tier::Release => &self.release,
        }
    }
}

fn default_artifact_targets() -> TierTargets {
    TierTargets::with_prefix("artifacts")
}

fn default_container_targets() -> TierTargets {
    TierTargets::with_prefix("registry")
}

/// Names of the artifact store and container registry for each tier.
///
/// Only the names are configurable; the category to tier mapping is fixed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RoutingConfig {
    #[serde(default = "default_artifact_targets")]
    pub artifact_store: TierTargets,

    #[serde(default = "default_container_targets")]
    pub container_registry: TierTargets,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        RoutingConfig {
            artifact_store: default_artifact_targets(),
            container_registry: default_container_targets(),
        }
    }
}

fn default_strategy() -> String {
    "auto".to_string()
}

/// Configuration for behavior customization.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BehaviorConfig {
    /// Reject unknown strategies instead of falling back to `auto`
    #[serde(default)]
    pub strict_strategy: bool,

    /// Strategy used when none is passed on the command line
    #[serde(default = "default_strategy")]
    pub default_strategy: String,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        BehaviorConfig {
            strict_strategy: false,
            default_strategy: default_strategy(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `versionresolver.toml` in current directory
/// 3. `.versionresolver.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse configuration from TOML text
pub fn parse_config(config_str: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(config_str).map_err(|e| ResolverError::config(e.to_string()))?;
    config.tags.tag_pattern()?;
    Ok(config)
}
