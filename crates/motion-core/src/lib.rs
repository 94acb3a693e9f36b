//! Frame-driven motion engine for the agency site's decorative effects.
//!
//! - [`field`]: particle backdrop with proximity and pointer links
//! - [`scroll`]: scroll-phase controller behind the pinned video reveal
//! - [`reveal`]: one-shot viewport reveals
//! - [`component`]: the above mounted on a [`host::Host`]

pub mod component;
pub mod config;
pub mod error;
pub mod field;
pub mod grid;
pub mod host;
pub mod math;
pub mod parallax;
pub mod particle;
pub mod reveal;
pub mod scroll;
pub mod spring;
pub mod surface;
pub mod timeline;
pub mod widgets;

pub use error::{MotionError, Result};
