pub mod niche;
pub mod platform;
pub mod similarity;
pub mod velocity;
