pub mod document;
pub mod entry;
pub mod error;
pub mod header;
mod lexer;
mod parser;
mod writer;

pub use document::DictionaryDocument;
pub use entry::Entry;
pub use error::{ParseError, ValueError};
pub use header::FoamHeader;
