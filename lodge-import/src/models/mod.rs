//! Data models for lodge-import

pub mod document;
pub mod entity;
pub mod import_result;

pub use document::*;
pub use entity::EntityKind;
pub use import_result::ImportResult;
