//! Name-keyed tool catalogue

use std::collections::HashMap;
use std::sync::Arc;

use crate::provider::ToolProvider;
use crate::tool::ToolDescriptor;

/// Outcome of [`ToolRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Inserted,
    /// An entry with the same name existed and was replaced.
    Replaced,
}

/// Tools keyed by name, listed in registration order.
///
/// Registering a name twice keeps the later descriptor at the earlier
/// position.
#[derive(Debug, Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    index: HashMap<&'static str, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from every provider's output, in provider order.
    pub async fn build(providers: &[Arc<dyn ToolProvider>]) -> Self {
        let mut registry = Self::new();
        for provider in providers {
            let tools = provider.tools().await;
            log::info!("Provider {} contributed {} tools", provider.name(), tools.len());
            registry.register_all(tools);
        }
        registry
    }

    pub fn register(&mut self, tool: ToolDescriptor) -> Registration {
        let name = tool.name();
        match self.index.get(name) {
            Some(&slot) => {
                log::warn!("Tool {name} registered twice, keeping the later registration");
                self.tools[slot] = tool;
                Registration::Replaced
            }
            None => {
                log::debug!("Registered tool {name}");
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
                Registration::Inserted
            }
        }
    }

    pub fn register_all(&mut self, tools: impl IntoIterator<Item = ToolDescriptor>) {
        for tool in tools {
            self.register(tool);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&ToolDescriptor> {
        self.index.get(name).map(|&slot| &self.tools[slot])
    }

    pub fn list(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tools.iter().map(ToolDescriptor::name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::{Tool, ToolContext, ToolResult};

    #[derive(Deserialize, schemars::JsonSchema)]
    struct NoArgs {}

    macro_rules! fixture_tool {
        ($ty:ident, $name:literal, $description:literal) => {
            struct $ty;

            impl Tool for $ty {
                type Args = NoArgs;

                fn name() -> &'static str {
                    $name
                }

                fn description() -> &'static str {
                    $description
                }

                async fn execute(&self, _ctx: &ToolContext, _args: NoArgs) -> anyhow::Result<ToolResult> {
                    Ok(ToolResult::success($description))
                }
            }
        };
    }

    fixture_tool!(First, "status", "first");
    fixture_tool!(Other, "log", "other");
    fixture_tool!(Second, "status", "second");

    #[test]
    fn later_registration_replaces_in_place() {
        let mut registry = ToolRegistry::new();
        assert_eq!(registry.register(ToolDescriptor::new(First)), Registration::Inserted);
        assert_eq!(registry.register(ToolDescriptor::new(Other)), Registration::Inserted);
        assert_eq!(registry.register(ToolDescriptor::new(Second)), Registration::Replaced);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["status", "log"]);
        assert_eq!(registry.lookup("status").map(ToolDescriptor::description), Some("second"));
        assert!(registry.lookup("diff").is_none());
    }
}
