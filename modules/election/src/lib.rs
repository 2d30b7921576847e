// === PUBLIC CONTRACT ===
pub mod contract;
pub use contract::model;

// === MODULE DEFINITION ===
pub mod module;
pub use module::{Election, ElectionOptions, MIGRATOR};

// === INTERNAL MODULES ===
// Exposed for integration tests; other crates go through `module` and `contract`.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;
