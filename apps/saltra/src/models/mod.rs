// Read-only aggregate views. The backend computes all of these; the client
// never mutates them.

pub mod analytics;
pub mod dashboard;
pub mod profile;

pub use analytics::{AnalyticsData, ConversionRate, ScoreBucket, SourceCount};
pub use dashboard::DashboardStats;
pub use profile::UserProfile;
