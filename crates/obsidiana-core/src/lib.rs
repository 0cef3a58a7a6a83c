pub mod color;
pub mod config;
pub mod error;
pub mod merge;
pub mod models;
pub mod module;
pub mod pipeline;
pub mod store;
pub mod transform;
pub mod validate;

pub use error::CoreError;
pub use models::{Brand, TokenCategory, TokenTree};
pub use module::TokenModule;
pub use transform::Platform;
