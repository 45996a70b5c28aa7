pub mod error;
pub mod ollama;
pub mod parse;
pub mod ports;
pub mod testing;

pub use error::{TextGenError, TextGenErrorKind};
pub use ollama::OllamaTextGen;
pub use parse::{extract_json_value, find_json_block};
pub use ports::{NoopTextGen, TextGenPort, TextGenRequest};
