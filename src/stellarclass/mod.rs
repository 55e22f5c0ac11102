//! Morgan–Keenan style stellar classification
//!
//! A compact value type for spectral types as they appear in star
//! catalogs: normal stars (including Wolf–Rayet stars and L/T/Y brown
//! dwarfs), white dwarfs, neutron stars, and black holes. Supports the
//! two versioned 16-bit packed wire forms used by star databases, a
//! forgiving parser for the irregular strings found in the Hipparcos
//! catalog, canonical text rendering, and a display color.
//!
//! # Example
//!
//! ```
//! use starlore::stellarclass::{LuminosityClass, SpectralClass, StellarClass};
//!
//! let sun: StellarClass = "G2V".parse().unwrap();
//! assert_eq!(
//!     sun,
//!     StellarClass::NormalStar {
//!         spectral: SpectralClass::G,
//!         subclass: Some(2),
//!         luminosity: LuminosityClass::V,
//!     }
//! );
//! assert_eq!(sun.to_string(), "G2 V");
//! ```

mod color;
mod pack;
mod parse;

pub use self::color::Color;
pub use self::pack::{DecodeError, PackVersion, NEUTRON_STAR_CLASS_COUNT, WD_CLASS_COUNT};

use std::cmp::Ordering;
use std::fmt;

/// Broad star category; selects how the spectral field is interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StarType {
    NormalStar,
    WhiteDwarf,
    NeutronStar,
    BlackHole,
}

/// Spectral classes of normal stars.
///
/// `R` and `N` were superseded by the carbon class `C`; `WC`/`WN`/`WO`
/// are the Wolf–Rayet sequences; `L`, `T`, and `Y` are brown dwarfs.
/// `Y` and `WO` postdate the legacy wire form, which shows in how V1
/// packs them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum SpectralClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
    R,
    S,
    N,
    WC,
    WN,
    Unknown,
    L,
    T,
    Y,
    C,
    WO,
}

/// White dwarf spectral classes; plain `D` is the undifferentiated form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum WhiteDwarfClass {
    D,
    DA,
    DB,
    DC,
    DO,
    DQ,
    DX,
    DZ,
}

/// Neutron star classes: plain `Q`, pulsars, magnetars, and
/// non-pulsating neutron stars.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum NeutronStarClass {
    Q,
    QN,
    QP,
    QM,
}

/// Luminosity classes, `I-a0` supergiants down to `VI` subdwarfs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LuminosityClass {
    Ia0,
    Ia,
    Ib,
    II,
    III,
    IV,
    V,
    VI,
    Unknown,
}

impl LuminosityClass {
    /// Canonical rendering suffix, leading space included; empty for
    /// `Unknown`.
    fn suffix(self) -> &'static str {
        match self {
            LuminosityClass::Ia0 => " I-a0",
            LuminosityClass::Ia => " I-a",
            LuminosityClass::Ib => " I-b",
            LuminosityClass::II => " II",
            LuminosityClass::III => " III",
            LuminosityClass::IV => " IV",
            LuminosityClass::V => " V",
            LuminosityClass::VI => " VI",
            LuminosityClass::Unknown => "",
        }
    }
}

/// Letters for rendering normal-star spectral classes, indexed by wire
/// ordinal. `WO` postdates the table and renders as `?`.
const SPECTRAL_LETTERS: &[u8] = b"OBAFGKMRSNWW?LTYC";

/// A star's spectral classification.
///
/// A small value type: the variant carries exactly the fields that are
/// meaningful for its star type, so a black hole cannot hold a
/// luminosity class and a white dwarf cannot hold a Wolf–Rayet
/// spectral class. A subclass of `None` is the unknown sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StellarClass {
    NormalStar {
        spectral: SpectralClass,
        subclass: Option<u8>,
        luminosity: LuminosityClass,
    },
    WhiteDwarf {
        spectral: WhiteDwarfClass,
        subclass: Option<u8>,
    },
    NeutronStar {
        spectral: NeutronStarClass,
        subclass: Option<u8>,
    },
    BlackHole,
}

impl StellarClass {
    /// The fully unknown classification
    pub const UNKNOWN: StellarClass = StellarClass::NormalStar {
        spectral: SpectralClass::Unknown,
        subclass: None,
        luminosity: LuminosityClass::Unknown,
    };

    pub fn star_type(&self) -> StarType {
        match self {
            StellarClass::NormalStar { .. } => StarType::NormalStar,
            StellarClass::WhiteDwarf { .. } => StarType::WhiteDwarf,
            StellarClass::NeutronStar { .. } => StarType::NeutronStar,
            StellarClass::BlackHole => StarType::BlackHole,
        }
    }

    /// Display color derived from the spectral class alone.
    ///
    /// Wolf–Rayet stars, white dwarfs, neutron stars, and black holes
    /// all tint plain white.
    pub fn apparent_color(&self) -> Color {
        let StellarClass::NormalStar { spectral, .. } = *self else {
            return Color::WHITE;
        };
        match spectral {
            SpectralClass::O => Color::new(0.7, 0.8, 1.0),
            SpectralClass::B => Color::new(0.8, 0.9, 1.0),
            SpectralClass::A => Color::WHITE,
            SpectralClass::F => Color::new(1.0, 1.0, 0.88),
            SpectralClass::G => Color::new(1.0, 1.0, 0.75),
            SpectralClass::K => Color::new(1.0, 0.9, 0.7),
            SpectralClass::M => Color::new(1.0, 0.7, 0.7),
            SpectralClass::R | SpectralClass::S | SpectralClass::N | SpectralClass::C => {
                Color::new(1.0, 0.4, 0.4)
            }
            SpectralClass::L | SpectralClass::T => Color::new(0.75, 0.2, 0.2),
            SpectralClass::Y => Color::new(0.5, 0.175, 0.125),
            SpectralClass::WC | SpectralClass::WN | SpectralClass::WO | SpectralClass::Unknown => {
                Color::WHITE
            }
        }
    }
}

impl Default for StellarClass {
    fn default() -> Self {
        StellarClass::UNKNOWN
    }
}

impl fmt::Display for StellarClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digit = |subclass: Option<u8>| subclass.map(|d| char::from(b'0' + d.min(9)));
        match *self {
            StellarClass::BlackHole => f.write_str("X"),
            StellarClass::WhiteDwarf { subclass, .. } => {
                f.write_str("WD")?;
                if let Some(d) = digit(subclass) {
                    write!(f, "{d}")?;
                }
                Ok(())
            }
            StellarClass::NeutronStar { subclass, .. } => {
                f.write_str("Q")?;
                if let Some(d) = digit(subclass) {
                    write!(f, "{d}")?;
                }
                Ok(())
            }
            StellarClass::NormalStar {
                spectral,
                subclass,
                luminosity,
            } => {
                let letter = SPECTRAL_LETTERS
                    .get(spectral.ordinal() as usize)
                    .copied()
                    .unwrap_or(b'?');
                write!(f, "{}", char::from(letter))?;
                if let Some(d) = digit(subclass) {
                    write!(f, "{d}")?;
                }
                f.write_str(luminosity.suffix())
            }
        }
    }
}

// Catalogs index stars by their current wire form; the wire order is
// the canonical order.
impl Ord for StellarClass {
    fn cmp(&self, other: &Self) -> Ordering {
        self.pack_v2().cmp(&other.pack_v2())
    }
}

impl PartialOrd for StellarClass {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
