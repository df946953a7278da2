mod extract;
mod reader;

pub use extract::{Field, FieldValue, Record, extract};
pub use reader::LogReader;
