pub mod entry;
pub mod types;

pub use entry::parse_entry;
pub use types::TableSpec;
