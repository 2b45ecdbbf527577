use serde::Serialize;

/// Admin landing page counters.
#[derive(Debug, Default, Serialize, utoipa::ToSchema)]
pub struct DashboardStats {
    pub works: u64,
    pub favorite_works: u64,
    pub testimonials: u64,
    /// Testimonials awaiting approval.
    pub pending_testimonials: u64,
    pub messages: u64,
    pub unread_messages: u64,
}
