use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreBucket {
    pub score: f64,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceCount {
    pub source: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversionRate {
    pub stage: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    pub lead_scoring_distribution: Vec<ScoreBucket>,
    pub source_breakdown: Vec<SourceCount>,
    pub conversion_rates: Vec<ConversionRate>,
}

impl AnalyticsData {
    pub fn total_scored(&self) -> u64 {
        self.lead_scoring_distribution.iter().map(|b| b.count).sum()
    }
}
