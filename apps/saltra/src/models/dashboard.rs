use serde::{Deserialize, Serialize};

/// Headline numbers for the dashboard landing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_leads: u64,
    pub new_leads: u64,
    pub hot_leads: u64,
    pub conversion_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_camel_case_wire_names() {
        let stats: DashboardStats = serde_json::from_value(json!({
            "totalLeads": 120,
            "newLeads": 14,
            "hotLeads": 9,
            "conversionRate": 12.5
        }))
        .unwrap();
        assert_eq!(stats.total_leads, 120);
        assert_eq!(stats.conversion_rate, 12.5);
    }

    #[test]
    fn test_snake_case_rejected() {
        let result = serde_json::from_value::<DashboardStats>(json!({
            "total_leads": 1,
            "new_leads": 1,
            "hot_leads": 1,
            "conversion_rate": 1.0
        }));
        assert!(result.is_err());
    }
}
