//! MCP tools for Git, the GitHub CLI and the GitKraken CLI
//!
//! Tools are grouped by area. Each area exposes a provider; [`catalogue`]
//! lists them in the order they are registered.

// Git
pub mod branches;
pub mod commits;
pub mod recovery;
pub mod repository;
pub mod status;
pub mod tags;

// External CLIs
pub mod github;
pub mod gitkraken;

// Host setup
pub mod installer;

use std::sync::Arc;

pub use github::GitHubProvider;
pub use gitkraken::GitKrakenProvider;

use crate::{CapabilityDetector, CommandRunner, Config, FeaturePolicy, SystemDetector, ToolProvider};

/// Environment probes shared between providers and the installer tools.
#[derive(Clone)]
pub struct Detectors {
    pub github: Arc<CapabilityDetector>,
    pub gitkraken: Arc<CapabilityDetector>,
    pub system: Arc<SystemDetector>,
}

impl Detectors {
    pub fn new(runner: Arc<dyn CommandRunner>, config: &Config) -> Self {
        let policy = if config.gitkraken_feature_probe {
            FeaturePolicy::ProbeSubcommands
        } else {
            FeaturePolicy::Coarse
        };
        Self {
            github: Arc::new(CapabilityDetector::github(runner.clone())),
            gitkraken: Arc::new(CapabilityDetector::gitkraken(runner.clone(), policy)),
            system: Arc::new(SystemDetector::new(runner)),
        }
    }
}

/// Every provider, in registration order.
pub fn catalogue(detectors: &Detectors) -> Vec<Arc<dyn ToolProvider>> {
    vec![
        Arc::new(repository::provider()),
        Arc::new(status::provider()),
        Arc::new(commits::provider()),
        Arc::new(branches::provider()),
        Arc::new(recovery::provider()),
        Arc::new(tags::provider()),
        Arc::new(GitHubProvider::new(detectors.github.clone())),
        Arc::new(GitKrakenProvider::new(detectors.gitkraken.clone())),
        Arc::new(installer::provider(
            detectors.system.clone(),
            detectors.gitkraken.clone(),
        )),
    ]
}

/// Serde default for flags that are on unless turned off.
pub(crate) fn default_true() -> bool {
    true
}
