pub mod auth;
pub mod content_setting;
pub mod dashboard;
pub mod message;
pub mod pages;
pub mod shared;
pub mod testimonial;
pub mod upload;
pub mod work;
