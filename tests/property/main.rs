// Property-based tests for availability editing, month grids and the
// saved-event projection

mod availability_properties;
mod calendar_properties;
