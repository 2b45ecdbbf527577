pub mod auth;
pub mod dashboard;
pub mod messages;
pub mod pages;
pub mod settings;
pub mod storage;
pub mod testimonials;
pub mod uploads;
pub mod works;
