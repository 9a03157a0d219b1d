// Per-resource data-access functions, one `impl ApiClient` block per backend area.
// Each is a thin typed wrapper over `ApiClient::request`.

pub mod analytics;
pub mod dashboard;
pub mod leads;
pub mod settings;

pub use leads::{LeadPage, LeadQuery};
