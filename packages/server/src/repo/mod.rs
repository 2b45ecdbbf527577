//! Database access, one module per table. Functions are generic over
//! `ConnectionTrait` so they work on a pool or inside a transaction.

pub mod content_setting;
pub mod message;
pub mod profile;
pub mod testimonial;
pub mod work;
