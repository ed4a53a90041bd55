//! Payload shapes exchanged with the block rendering service.
//!
//! The service speaks camelCase JSON. Missing booleans decode as `false` and
//! missing lengths as `0`, so a sparse answer still produces a report.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Block type rendered by the render probe unless configured otherwise.
pub const DEFAULT_BLOCK_TYPE: &str = "hero-v3-perfect";

/// Props sent with the default render probe.
#[must_use]
pub fn default_props() -> Value {
    json!({
        "variant": "split-modern",
        "title": "Test Hero V3",
        "subtitle": "Testing the V3 rendering system",
    })
}

/// Body of `GET /api/test-v3`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityProbeResponse {
    /// Whether the service could inspect its block registry.
    #[serde(default)]
    pub success: bool,
    /// Per-block capabilities, in the order the server listed them.
    #[serde(default)]
    pub results: IndexMap<String, BlockCapability>,
    /// Optional server-side error message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// What the service reports about one registered block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawBlockCapability")]
pub struct BlockCapability {
    /// The block is registered.
    pub found: bool,
    /// The block exposes a render function.
    pub has_render_function: bool,
    /// Declared props, in whatever form the server reports them.
    pub has_props: Value,
    /// Outcome of the trial render, if one was attempted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderOutcome>,
}

/// Outcome of a trial render; a block has either metrics or an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenderOutcome {
    /// Render succeeded.
    Rendered(RenderMetrics),
    /// Render failed with the given message.
    Failed(String),
}

/// Output size metrics of a trial render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderMetrics {
    /// HTML was produced.
    #[serde(default)]
    pub has_html: bool,
    /// HTML length in characters.
    #[serde(default)]
    pub html_length: u64,
    /// CSS length in characters.
    #[serde(default)]
    pub css_length: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBlockCapability {
    #[serde(default)]
    found: bool,
    #[serde(default)]
    has_render_function: bool,
    #[serde(default)]
    has_props: Value,
    #[serde(default)]
    render_result: Option<RenderMetrics>,
    #[serde(default)]
    render_error: Option<String>,
}

impl From<RawBlockCapability> for BlockCapability {
    fn from(raw: RawBlockCapability) -> Self {
        // renderResult wins if a misbehaving server sends both
        let render = raw
            .render_result
            .map(RenderOutcome::Rendered)
            .or_else(|| raw.render_error.map(RenderOutcome::Failed));

        Self {
            found: raw.found,
            has_render_function: raw.has_render_function,
            has_props: raw.has_props,
            render,
        }
    }
}

/// Body of `POST /api/test-v3`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    /// Block type to render.
    pub block_type: String,
    /// Props passed to the block.
    pub props: Value,
}

impl RenderRequest {
    /// Creates a render request.
    #[must_use]
    pub fn new(block_type: impl Into<String>, props: Value) -> Self {
        Self {
            block_type: block_type.into(),
            props,
        }
    }
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_TYPE, default_props())
    }
}

/// Response of `POST /api/test-v3`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResponse {
    /// Whether the render succeeded.
    #[serde(default)]
    pub success: bool,
    /// Render summary, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<RenderSummary>,
    /// Optional server-side error message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of a successful render.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSummary {
    /// Rendered block type as reported by the server.
    #[serde(rename = "type", default)]
    pub block_type: String,
    /// HTML was produced.
    #[serde(default)]
    pub has_html: bool,
    /// CSS was produced.
    #[serde(default)]
    pub has_css: bool,
}
