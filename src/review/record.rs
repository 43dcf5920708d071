use serde::{Deserialize, Serialize};

/// One reviewable subject read from an input batch
///
/// Batches are produced by the listing stage; a descriptor without a link can
/// still appear there and is handled like an unreachable first page.
#[derive(Debug, Clone, Deserialize)]
pub struct Entity {
    #[serde(default = "default_entity_name")]
    pub name: String,
    pub link: Option<String>,
}

fn default_entity_name() -> String {
    "restaurant".to_string()
}

/// One extracted review
///
/// Field names match the artifacts the original pipeline published, so
/// downstream consumers keep working. Every extraction-dependent field has a
/// type-appropriate default; a review with nothing but defaults is still a
/// valid record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub restaurant_name: String,
    pub user_name: String,
    pub user_profile_link: String,
    pub rating: u32,
    pub visit_date: String,
    pub travel_type: String,
    pub review_title: String,
    pub review_text: String,
    pub value_rating: u32,
    pub service_rating: u32,
    pub food_rating: u32,
    pub atmosphere_rating: u32,
    pub helpful_vote_count: u32,
}
