//! Settings, content catalogs and the on-disk ending store.

pub mod load;
pub mod store;

pub use load::*;
pub use store::*;
