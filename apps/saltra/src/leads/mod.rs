// Lead schema: entity shapes exchanged with the backend plus the field
// constraints forms apply before submitting.

pub mod models;
pub mod validation;

pub use models::{
    Interaction, InteractionType, LeadBase, LeadCategory, LeadListSchema, LeadModel, LeadSource,
    LeadStatus, LeadUpdateSchema,
};
pub use validation::{validate_lead, validate_score, validate_update, LeadValidationReport};
