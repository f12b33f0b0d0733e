//! Built-in game content and content-pack loading.
//!
//! The session core asks an external generator for scenes, encounters, and
//! social beats; everything here is the deterministic side of that
//! arrangement. [`catalog`] holds the shipped world, enemies, and items;
//! [`fallback`] produces the substitute payloads used whenever a generator
//! call fails, so the engine keeps working with no generator at all.

pub mod catalog;
pub mod fallback;

#[cfg(feature = "loaders")]
pub mod loaders;
