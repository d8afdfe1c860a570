// Mon Feb 02 2026 - Alex

pub mod alignment;
pub mod error;
pub mod layout;
pub mod analyzer;
pub mod cache;

pub use alignment::PointerWidth;
pub use error::LayoutError;
pub use layout::{TypeLayout, LayoutKind};
pub use cache::TypeLayoutCache;
