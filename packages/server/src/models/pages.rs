use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::content_setting::ResolvedContent;
use crate::models::testimonial::TestimonialResponse;
use crate::models::work::WorkResponse;

/// Number of favourites shown on the home page.
pub const HOME_FAVORITES_LIMIT: usize = 6;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HomePage {
    pub content: BTreeMap<String, ResolvedContent>,
    /// Renderable favourites, newest first.
    pub favorites: Vec<WorkResponse>,
    /// Approved testimonials, newest first.
    pub testimonials: Vec<TestimonialResponse>,
}

/// Page made only of resolved copy (about, services).
#[derive(Serialize, utoipa::ToSchema)]
pub struct ContentPage {
    pub content: BTreeMap<String, ResolvedContent>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct WorksPage {
    pub works: Vec<WorkResponse>,
    /// Distinct categories, sorted, for the gallery filter.
    pub categories: Vec<String>,
}
