// Module exports for models

pub mod event;
pub mod profile;
pub mod recommendation;
pub mod saved;
pub mod session;
pub mod time_range;
