// Service module exports

pub mod api;
pub mod availability;
pub mod calendar;
pub mod month_cursor;
pub mod profile;
pub mod saved;
pub mod session;
