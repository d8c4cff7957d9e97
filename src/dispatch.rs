//! Single entry point turning "call tool X with Y" into a result
//!
//! Lookup misses and argument mismatches are caller errors, a tool body
//! returning `Err` or panicking is an internal error. Everything a tool
//! returns as a [`ToolResult`] is a successful dispatch, whatever its
//! `success` flag says.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::ToolError;
use crate::capability::CapabilityDetector;
use crate::context::ToolContext;
use crate::provider::ToolProvider;
use crate::registry::ToolRegistry;
use crate::result::ToolResult;
use crate::tool::{Invocation, ToolDescriptor};

struct Catalogue {
    registry: ToolRegistry,
    generations: Vec<u64>,
}

/// Owns the registry built from a fixed provider list.
///
/// The registry is rebuilt when a gating detector was reset since the last
/// build, so a freshly installed binary shows up without a restart.
pub struct Dispatcher {
    context: ToolContext,
    providers: Vec<Arc<dyn ToolProvider>>,
    detectors: Vec<Arc<CapabilityDetector>>,
    catalogue: RwLock<Catalogue>,
}

impl Dispatcher {
    pub async fn new(context: ToolContext, providers: Vec<Arc<dyn ToolProvider>>) -> Self {
        let detectors: Vec<_> = providers.iter().flat_map(|p| p.detectors()).collect();
        let generations = detectors.iter().map(|d| d.generation()).collect();
        let registry = ToolRegistry::build(&providers).await;
        log::info!("Tool registry ready with {} tools", registry.len());
        Self {
            context,
            providers,
            detectors,
            catalogue: RwLock::new(Catalogue {
                registry,
                generations,
            }),
        }
    }

    pub fn context(&self) -> &ToolContext {
        &self.context
    }

    /// Every registered tool in registration order.
    pub async fn list(&self) -> Vec<ToolDescriptor> {
        self.refresh_if_stale().await;
        self.catalogue.read().await.registry.list().to_vec()
    }

    pub async fn lookup(&self, name: &str) -> Option<ToolDescriptor> {
        if let Some(found) = self.catalogue.read().await.registry.lookup(name) {
            return Some(found.clone());
        }
        if self.refresh_if_stale().await {
            return self.catalogue.read().await.registry.lookup(name).cloned();
        }
        None
    }

    /// Run `name` with raw `args`. Missing arguments mean `{}`.
    pub async fn dispatch(&self, name: &str, args: Option<Map<String, Value>>) -> Result<ToolResult, ToolError> {
        let Some(descriptor) = self.lookup(name).await else {
            log::warn!("Call to unknown tool {name}");
            return Err(ToolError::NotFound(name.to_string()));
        };

        log::info!("Dispatching {name}");
        let call = descriptor.handler().call(&self.context, args.unwrap_or_default());

        match AssertUnwindSafe(call).catch_unwind().await {
            Ok(Ok(result)) => {
                if !result.is_success() {
                    log::info!("{name} failed: {}", result.message());
                }
                Ok(result)
            }
            Ok(Err(Invocation::BadArgs(e))) => Err(ToolError::InvalidParams {
                tool: name.to_string(),
                message: e.to_string(),
            }),
            Ok(Err(Invocation::Defect(e))) => {
                log::error!("{name} raised an error: {e:#}");
                Err(ToolError::Internal {
                    tool: name.to_string(),
                    message: format!("{e:#}"),
                })
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                log::error!("{name} panicked: {message}");
                Err(ToolError::Internal {
                    tool: name.to_string(),
                    message,
                })
            }
        }
    }

    /// Rebuild the registry if any detector was reset since the last build.
    /// Returns whether a rebuild happened.
    pub async fn refresh_if_stale(&self) -> bool {
        let current: Vec<u64> = self.detectors.iter().map(|d| d.generation()).collect();
        if self.catalogue.read().await.generations == current {
            return false;
        }
        let registry = ToolRegistry::build(&self.providers).await;
        log::info!("Tool registry rebuilt with {} tools", registry.len());
        let mut catalogue = self.catalogue.write().await;
        catalogue.registry = registry;
        catalogue.generations = current;
        true
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "tool panicked".to_string()
    }
}
