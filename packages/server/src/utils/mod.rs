pub mod filename;
pub mod hash;
pub mod imaging;
pub mod jwt;
pub mod rate_limit;
pub mod youtube;
