// context/mod.rs
mod providers;
mod registry;

pub use providers::{initialize_context, store_options, warn_about_legacy_store};
pub use registry::{ContextSlot, ServiceContext};
