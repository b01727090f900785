use serde::{Deserialize, Serialize};

/// Request body for the streaming relay.
#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Request body for the roadmap API.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapRequest {
    pub goal: String,
    pub hours_per_day: u32,
}

/// Matches the backend `ErrorBody`.
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct NodeStyle {
    pub background: String,
    pub color: String,
    pub border: String,
    pub width: u32,
}

/// Matches the backend `RoadmapNode` model.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RoadmapNode {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub lines: Vec<String>,
    pub style: NodeStyle,
}

/// Matches the backend `Roadmap` model. Edges and positions are dropped:
/// nodes arrive in path order and are listed, not drawn.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Roadmap {
    pub nodes: Vec<RoadmapNode>,
    pub total_days: u32,
}
