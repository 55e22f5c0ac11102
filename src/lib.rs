//! Stellar classification and planetary ephemeris cores for celestial
//! visualization
//!
//! Two tightly coupled subsystems extracted from a star-rendering stack,
//! plus the name index that ties catalog entries together:
//!
//! - [`stellarclass`] — Morgan–Keenan style spectral types for normal
//!   stars, Wolf–Rayet stars, brown dwarfs, white dwarfs, neutron stars,
//!   and black holes: two versioned 16-bit packed wire forms, a forgiving
//!   parser for the irregular strings found in real star catalogs,
//!   canonical text rendering, and a display color.
//! - [`jplephem`] — JPL DE-series and IMCCE INPOP binary ephemerides:
//!   header parsing with byte-order discovery, and planetary positions by
//!   Chebyshev interpolation of the file's precomputed coefficients.
//! - [`namedb`] — bidirectional star-name index with case-insensitive
//!   lookup, Greek Bayer prefixes, a localization overlay, and ordered
//!   prefix completion.
//!
//! # Example
//!
//! ```
//! use starlore::StellarClass;
//!
//! let rigel: StellarClass = "B8Ia".parse().unwrap();
//! assert_eq!(rigel.to_string(), "B8 I-a");
//! ```

pub mod jplephem;
pub mod namedb;
pub mod stellarclass;

pub use crate::jplephem::{JplEphError, JplEphItem, JplEphemeris};
pub use crate::namedb::NameDatabase;
pub use crate::stellarclass::{Color, StellarClass};
