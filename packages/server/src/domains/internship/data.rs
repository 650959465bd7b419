use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domains::internship::models::Internship;

/// Internship API data type
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternshipData {
    pub id: String,
    pub joined_date: NaiveDate,
    pub completion_date: NaiveDate,
    pub is_certified: bool,
    pub mentor_name: String,
    pub user_id: String,
}

impl From<Internship> for InternshipData {
    fn from(internship: Internship) -> Self {
        Self {
            id: internship.id.to_string(),
            joined_date: internship.joined_date,
            completion_date: internship.completion_date,
            is_certified: internship.is_certified,
            mentor_name: internship.mentor_name,
            user_id: internship.user_id.to_string(),
        }
    }
}

/// Body of `POST /users/:userId/internships`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInternshipRequest {
    pub joined_date: NaiveDate,
    pub completion_date: NaiveDate,
    #[serde(default)]
    pub is_certified: bool,
    pub mentor_name: String,
}
