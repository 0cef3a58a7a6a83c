//! Framework themes generated from a brand's resolved token module.
//!
//! The module is located by [`BrandLoader`] (published package first, local
//! build output second) and projected into daisyUI, Material UI and shadcn
//! shapes. Projection is pure; loading is the only async step.

pub mod daisyui;
pub mod error;
pub mod generator;
pub mod loader;
mod lookup;
pub mod mode;
pub mod mui;
pub mod shadcn;
pub mod writer;

pub use error::{ResolveError, ThemeError};
pub use generator::{ThemeFormat, ThemeGenerator, ThemeSet};
pub use loader::{BrandLoader, FileResolver, MemoryResolver, ModuleResolver};
pub use mode::ThemeMode;
