pub mod config;
pub mod convert;
pub mod error;
pub mod parse;
pub mod postman;

pub use config::ConvertConfig;
pub use convert::{SourceFormat, assemble, convert_json, convert_str, convert_yaml};
pub use error::ConvertError;
pub use postman::Collection;
