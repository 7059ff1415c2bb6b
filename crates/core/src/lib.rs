//! Core turn-resolution logic. Keep this crate free of IO and platform concerns.

pub mod card_pool;
pub mod cards;
pub mod config;
pub mod content;
pub mod effects;
pub mod ending;
pub mod event_pool;
pub mod events;
pub mod host;
pub mod rng;
pub mod run;
pub mod scoring;
pub mod state;
pub mod store;

pub use card_pool::*;
pub use cards::*;
pub use config::*;
pub use content::*;
pub use effects::*;
pub use ending::*;
pub use event_pool::*;
pub use events::*;
pub use host::*;
pub use rng::*;
pub use run::*;
pub use scoring::*;
pub use state::*;
pub use store::*;
