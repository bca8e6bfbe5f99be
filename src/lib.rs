#![forbid(unsafe_code)]

pub mod cli;
pub mod dates;
pub mod epub_reader;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod markdown;
pub mod reader;
pub mod registry;
pub mod sanitize;
pub mod scanner;
pub mod slicer;

pub use error::ReadingError;
pub use extractor::DailyReader;
pub use reader::{ReadingResult, NOT_FOUND_MESSAGE};
pub use registry::{BookDescriptor, BookRegistry};
