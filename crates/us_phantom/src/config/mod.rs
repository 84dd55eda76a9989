//! Phantom configuration: raw documents, the typed configuration and its validation.
//!
//! A configuration source hands over a [`PhantomDocument`]. [`validate_configuration`] checks it
//! and builds the immutable [`Configuration`] every later step reads from.
pub mod document;
pub mod types;
pub mod validation;

pub use document::{PhantomDocument, RegionDocument};
pub use types::{Configuration, PhantomFormat, DEFAULT_DENSITY_KG_M3, DEFAULT_SOUND_SPEED_M_S};
pub use validation::{validate_configuration, Validated};
