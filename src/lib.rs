pub mod completion;
pub mod diesel;
pub mod filters;
pub mod flags;
pub mod kpi;
pub mod numeric;
pub mod output;
pub mod snapshot;
pub mod trip_summary;
pub mod types;
