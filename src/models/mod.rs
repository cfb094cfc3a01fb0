pub mod canonical;
pub mod enums;
pub mod legacy;
pub mod lenient;
pub mod records;
pub mod response;

pub use canonical::*;
pub use enums::*;
pub use response::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResponseError {
    #[error("JSON parsing error: {0}")]
    JsonParsing(String),

    #[error("Response root must be a JSON object")]
    NotAnObject,

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Section index {index} out of range (response has {len} sections)")]
    SectionOutOfRange { index: usize, len: usize },

    #[error("Component index {index} out of range (section {section} has {len} components)")]
    ComponentOutOfRange {
        section: usize,
        index: usize,
        len: usize,
    },

    #[error("Card type cannot change on edit: {from} -> {to}")]
    TypeChanged { from: String, to: String },
}
