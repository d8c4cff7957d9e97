//! Tool providers: one functional area of the catalogue each

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::capability::CapabilityDetector;
use crate::tool::ToolDescriptor;

/// Produces the tools of one area, possibly after probing the environment.
///
/// A provider gated on an optional binary returns no tools at all when the
/// binary is unavailable.
pub trait ToolProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn tools(&self) -> BoxFuture<'_, Vec<ToolDescriptor>>;

    /// Detectors whose cache decides this provider's output.
    fn detectors(&self) -> Vec<Arc<CapabilityDetector>> {
        Vec::new()
    }
}

/// Provider with a fixed tool list.
pub struct StaticProvider {
    name: &'static str,
    tools: Vec<ToolDescriptor>,
}

impl StaticProvider {
    pub fn new(name: &'static str, tools: Vec<ToolDescriptor>) -> Self {
        Self { name, tools }
    }
}

impl ToolProvider for StaticProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn tools(&self) -> BoxFuture<'_, Vec<ToolDescriptor>> {
        Box::pin(async move { self.tools.clone() })
    }
}
