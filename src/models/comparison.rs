use serde::{Deserialize, Serialize};

use super::insights::UserInsights;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricDirection {
    Up,
    Down,
    Equal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonMetric {
    pub id: String,
    pub label: String,
    pub description: Option<String>,
    pub value_a: f64,
    pub value_b: f64,
    /// `value_a - value_b`, rounded to 2 decimals.
    pub diff: f64,
    pub direction: MetricDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub user_a: UserInsights,
    pub user_b: UserInsights,
    pub metrics: Vec<ComparisonMetric>,
    /// The metric with the largest absolute gap; `None` when every metric
    /// is a tie.
    pub hero_metric: Option<ComparisonMetric>,
    pub summary: String,
    pub meme_prompt: Option<MemePrompt>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemePrompt {
    pub template_id: String,
    pub top_text: String,
    pub bottom_text: String,
}
