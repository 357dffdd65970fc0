pub mod content;
pub mod sessions;
