//! Detection of optional external command-line tools
//!
//! A [`CapabilityDetector`] answers "is this binary usable, which version,
//! which sub-features" once and caches the answer until [`reset_cache`] is
//! called. Probe failures only ever mean "not available".
//!
//! [`reset_cache`]: CapabilityDetector::reset_cache

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::runner::{CommandLine, CommandRunner};

static VERSION_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\d+\.\d+(?:\.\d+)?").ok());

/// Optional sub-capability of a binary, probed through one of its sub-commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub name: &'static str,
    pub subcommand: &'static str,
}

impl Feature {
    pub const fn new(name: &'static str, subcommand: &'static str) -> Self {
        Self { name, subcommand }
    }
}

/// GitKraken CLI sub-capabilities.
pub const GITKRAKEN_FEATURES: [Feature; 4] = [
    Feature::new("graph", "graph"),
    Feature::new("workflow", "work"),
    Feature::new("workspace", "workspace"),
    Feature::new("ai", "ai"),
];

/// How sub-features are decided once the binary is known to be present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FeaturePolicy {
    /// Every declared feature is reported present.
    #[default]
    Coarse,
    /// A feature is present when `<binary> <subcommand> --help` succeeds.
    ProbeSubcommands,
}

/// Point-in-time view of a detector's cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapabilitySnapshot {
    pub available: bool,
    pub version: Option<String>,
    pub features: BTreeMap<String, bool>,
}

impl CapabilitySnapshot {
    /// Whether `feature` is present. Unknown features are absent.
    pub fn has(&self, feature: &str) -> bool {
        self.available && self.features.get(feature).copied().unwrap_or(false)
    }
}

#[derive(Debug, Default)]
struct ProbeState {
    available: Option<bool>,
    version: Option<Option<String>>,
    features: Option<BTreeMap<String, bool>>,
}

/// Cached probe for one optional binary.
pub struct CapabilityDetector {
    binary: String,
    runner: Arc<dyn CommandRunner>,
    features: Vec<Feature>,
    policy: FeaturePolicy,
    state: Mutex<ProbeState>,
    generation: AtomicU64,
}

impl CapabilityDetector {
    pub fn new(binary: impl Into<String>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            binary: binary.into(),
            runner,
            features: Vec::new(),
            policy: FeaturePolicy::Coarse,
            state: Mutex::new(ProbeState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Detector for the GitKraken CLI (`gk`).
    pub fn gitkraken(runner: Arc<dyn CommandRunner>, policy: FeaturePolicy) -> Self {
        Self::new("gk", runner)
            .with_features(GITKRAKEN_FEATURES.to_vec())
            .with_policy(policy)
    }

    /// Detector for the GitHub CLI (`gh`).
    pub fn github(runner: Arc<dyn CommandRunner>) -> Self {
        Self::new("gh", runner)
    }

    pub fn with_features(mut self, features: Vec<Feature>) -> Self {
        self.features = features;
        self
    }

    pub fn with_policy(mut self, policy: FeaturePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Incremented by every [`reset_cache`](Self::reset_cache).
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Whether any probe succeeds: `<bin> version`, `<bin> help`, then a
    /// path lookup. Cached after the first call.
    pub async fn is_available(&self) -> bool {
        let mut state = self.state.lock().await;
        self.available_locked(&mut state).await
    }

    /// Version parsed from `<bin> version`, `None` when unavailable or unparsable.
    pub async fn version(&self) -> Option<String> {
        let mut state = self.state.lock().await;
        if let Some(version) = &state.version {
            return version.clone();
        }
        let version = if self.available_locked(&mut state).await {
            self.probe_version().await
        } else {
            None
        };
        state.version = Some(version.clone());
        version
    }

    /// Availability, version and feature flags. All flags are false when the
    /// binary is unavailable.
    pub async fn capabilities(&self) -> CapabilitySnapshot {
        let version = self.version().await;
        let mut state = self.state.lock().await;
        let available = self.available_locked(&mut state).await;

        let features = match &state.features {
            Some(features) => features.clone(),
            None => {
                let features = self.probe_features(available).await;
                state.features = Some(features.clone());
                features
            }
        };

        CapabilitySnapshot {
            available,
            version,
            features,
        }
    }

    /// Forget everything probed so far.
    pub async fn reset_cache(&self) {
        let mut state = self.state.lock().await;
        *state = ProbeState::default();
        self.generation.fetch_add(1, Ordering::AcqRel);
        log::debug!("{} detector cache reset", self.binary);
    }

    async fn available_locked(&self, state: &mut ProbeState) -> bool {
        if let Some(available) = state.available {
            return available;
        }
        let available = self.probe_available().await;
        if available {
            log::info!("{} detected and available", self.binary);
        } else {
            log::info!("{} not available, its tools are disabled", self.binary);
        }
        state.available = Some(available);
        available
    }

    async fn probe_available(&self) -> bool {
        let lookup = if cfg!(windows) { "where" } else { "which" };
        let probes = [
            CommandLine::new(&self.binary).arg("version"),
            CommandLine::new(&self.binary).arg("help"),
            CommandLine::new(lookup).arg(&self.binary),
        ];
        for probe in &probes {
            match self.runner.run(probe).await {
                Ok(_) => return true,
                Err(e) => log::debug!("probe `{probe}` failed: {e}"),
            }
        }
        false
    }

    async fn probe_version(&self) -> Option<String> {
        let probe = CommandLine::new(&self.binary).arg("version");
        match self.runner.run(&probe).await {
            Ok(output) => parse_version(&output.stdout),
            Err(e) => {
                log::warn!("Failed to read {} version: {e}", self.binary);
                None
            }
        }
    }

    async fn probe_features(&self, available: bool) -> BTreeMap<String, bool> {
        let mut features = BTreeMap::new();
        for feature in &self.features {
            let present = match (available, self.policy) {
                (false, _) => false,
                (true, FeaturePolicy::Coarse) => true,
                (true, FeaturePolicy::ProbeSubcommands) => {
                    let probe = CommandLine::new(&self.binary).args([feature.subcommand, "--help"]);
                    self.runner.run(&probe).await.is_ok()
                }
            };
            features.insert(feature.name.to_string(), present);
        }
        features
    }
}

/// First `major.minor[.patch]` in `text`.
pub fn parse_version(text: &str) -> Option<String> {
    VERSION_RE
        .as_ref()?
        .find(text)
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_extracted_from_banner() {
        assert_eq!(parse_version("gk version 2.1.3 (darwin/arm64)"), Some("2.1.3".into()));
        assert_eq!(parse_version("gh version 2.40\n"), Some("2.40".into()));
        assert_eq!(parse_version("development build"), None);
    }

    #[test]
    fn snapshot_reports_unknown_features_absent() {
        let snapshot = CapabilitySnapshot {
            available: true,
            version: None,
            features: BTreeMap::from([("graph".to_string(), true)]),
        };
        assert!(snapshot.has("graph"));
        assert!(!snapshot.has("ai"));
    }
}
