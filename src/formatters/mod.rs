pub mod json;
pub mod summary;

pub use json::GraphJsonWriter;
pub use summary::SummaryFormatter;
