//! Tool abstraction and the type-erased descriptor stored in the registry

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::context::ToolContext;
use crate::result::ToolResult;

/// A named, schema-described operation.
///
/// `execute` returns `Ok` for every expected outcome, including failures the
/// caller should see as `success: false`. `Err` is reserved for defects and is
/// reported by the dispatcher as an internal error.
pub trait Tool: Send + Sync + 'static {
    type Args: DeserializeOwned + JsonSchema + Send;

    fn name() -> &'static str;

    fn description() -> &'static str;

    fn read_only() -> bool {
        false
    }

    fn destructive() -> bool {
        false
    }

    fn idempotent() -> bool {
        false
    }

    fn execute(
        &self,
        ctx: &ToolContext,
        args: Self::Args,
    ) -> impl Future<Output = anyhow::Result<ToolResult>> + Send;
}

/// Behaviour hints advertised alongside a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Annotations {
    pub read_only: bool,
    pub destructive: bool,
    pub idempotent: bool,
}

/// Why an erased invocation did not produce a result.
#[derive(Debug)]
pub enum Invocation {
    /// Arguments did not match the declared shape.
    BadArgs(serde_json::Error),
    /// The tool body returned an error.
    Defect(anyhow::Error),
}

/// Object-safe view of a [`Tool`].
pub trait ExecutableTool: Send + Sync {
    fn call<'a>(
        &'a self,
        ctx: &'a ToolContext,
        args: Map<String, Value>,
    ) -> BoxFuture<'a, Result<ToolResult, Invocation>>;
}

impl<T: Tool> ExecutableTool for T {
    fn call<'a>(
        &'a self,
        ctx: &'a ToolContext,
        args: Map<String, Value>,
    ) -> BoxFuture<'a, Result<ToolResult, Invocation>> {
        Box::pin(async move {
            let args: T::Args =
                serde_json::from_value(Value::Object(args)).map_err(Invocation::BadArgs)?;
            self.execute(ctx, args).await.map_err(Invocation::Defect)
        })
    }
}

/// Immutable registration unit: metadata plus the erased tool.
#[derive(Clone)]
pub struct ToolDescriptor {
    name: &'static str,
    description: &'static str,
    input_schema: Arc<Map<String, Value>>,
    annotations: Annotations,
    handler: Arc<dyn ExecutableTool>,
}

impl ToolDescriptor {
    /// Wrap `tool`, generating its input schema once.
    pub fn new<T: Tool>(tool: T) -> Self {
        Self {
            name: T::name(),
            description: T::description(),
            input_schema: Arc::new(schema_object::<T::Args>()),
            annotations: Annotations {
                read_only: T::read_only(),
                destructive: T::destructive(),
                idempotent: T::idempotent(),
            },
            handler: Arc::new(tool),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn input_schema(&self) -> &Arc<Map<String, Value>> {
        &self.input_schema
    }

    pub fn annotations(&self) -> Annotations {
        self.annotations
    }

    pub fn handler(&self) -> &dyn ExecutableTool {
        self.handler.as_ref()
    }
}

impl fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("annotations", &self.annotations)
            .finish_non_exhaustive()
    }
}

/// JSON schema of `A` as an object, always carrying `"type": "object"`.
fn schema_object<A: JsonSchema>() -> Map<String, Value> {
    let mut map = match serde_json::to_value(schemars::schema_for!(A)) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    map.entry("type".to_string())
        .or_insert_with(|| Value::String("object".to_string()));
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    struct EchoArgs {
        text: String,
        #[serde(default)]
        #[allow(dead_code)]
        loud: bool,
    }

    struct Echo;

    impl Tool for Echo {
        type Args = EchoArgs;

        fn name() -> &'static str {
            "echo"
        }

        fn description() -> &'static str {
            "Echo the text back"
        }

        fn read_only() -> bool {
            true
        }

        async fn execute(&self, _ctx: &ToolContext, args: EchoArgs) -> anyhow::Result<ToolResult> {
            Ok(ToolResult::success(args.text))
        }
    }

    #[test]
    fn descriptor_schema_lists_required_properties() {
        let descriptor = ToolDescriptor::new(Echo);
        let schema = descriptor.input_schema();
        assert_eq!(schema.get("type"), Some(&Value::String("object".into())));
        assert!(schema["properties"].get("text").is_some());
        assert_eq!(schema["required"], serde_json::json!(["text"]));
        assert!(descriptor.annotations().read_only);
        assert!(!descriptor.annotations().destructive);
    }
}
