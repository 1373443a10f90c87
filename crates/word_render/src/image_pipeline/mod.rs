pub mod adjust;
pub mod encode;
pub mod loader;
pub mod resize;
