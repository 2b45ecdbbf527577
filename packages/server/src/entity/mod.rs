pub mod content_setting;
pub mod message;
pub mod profile;
pub mod testimonial;
pub mod work;
