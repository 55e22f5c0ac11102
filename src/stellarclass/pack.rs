//! Packed 16-bit wire forms for catalog storage
//!
//! Star databases store each classification as one 16-bit word. Two
//! layouts exist:
//!
//! V2 (current):
//!
//! ```text
//! bits 15..13  star type
//! bits 12..8   spectral class
//! bits  7..4   subclass
//! bits  3..0   luminosity class
//! ```
//!
//! V1 (legacy, database version 0x0100):
//!
//! ```text
//! bits 15..12  star type
//! bits 11..8   spectral class
//! bits  7..4   subclass
//! bits  3..0   luminosity class
//! ```
//!
//! V1 predates the `Y` brown-dwarf class: `Y` packs as `Unknown`, the
//! classes past it shift down one slot, and the slot `Y` later took
//! decodes as `C` to keep old catalogs readable.

use thiserror::Error;

use super::{
    LuminosityClass, NeutronStarClass, SpectralClass, StellarClass, WhiteDwarfClass,
};

/// White dwarf classes counted by the wire-format range check
pub const WD_CLASS_COUNT: u16 = 8;
/// Neutron star classes counted by the wire-format range check
pub const NEUTRON_STAR_CLASS_COUNT: u16 = 4;

/// Wire nibble for an unknown subclass
const SUBCLASS_UNKNOWN: u16 = 10;

/// Catalog version tag whose star records still use the V1 layout
const STAR_DB_VERSION_V1: u16 = 0x0100;

/// Failure to decode a packed stellar class.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The star-type bits name a reserved category
    #[error("reserved star type {0}")]
    StarType(u16),

    /// A spectral-class field is outside its family's range
    #[error("spectral class field {value} out of range for {family}")]
    SpectralClass { family: &'static str, value: u16 },
}

/// Wire-format revision used by a containing star catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PackVersion {
    V1,
    V2,
}

impl PackVersion {
    /// Map a star-database version tag to the packed-class revision it
    /// stores.
    pub fn for_catalog_version(tag: u16) -> PackVersion {
        if tag == STAR_DB_VERSION_V1 {
            PackVersion::V1
        } else {
            PackVersion::V2
        }
    }
}

impl SpectralClass {
    /// Wire ordinal; the rendering table is indexed by the same value.
    pub(crate) fn ordinal(self) -> u16 {
        match self {
            SpectralClass::O => 0,
            SpectralClass::B => 1,
            SpectralClass::A => 2,
            SpectralClass::F => 3,
            SpectralClass::G => 4,
            SpectralClass::K => 5,
            SpectralClass::M => 6,
            SpectralClass::R => 7,
            SpectralClass::S => 8,
            SpectralClass::N => 9,
            SpectralClass::WC => 10,
            SpectralClass::WN => 11,
            SpectralClass::Unknown => 12,
            SpectralClass::L => 13,
            SpectralClass::T => 14,
            SpectralClass::Y => 15,
            SpectralClass::C => 16,
            SpectralClass::WO => 17,
        }
    }

    fn from_ordinal(value: u16) -> Option<SpectralClass> {
        Some(match value {
            0 => SpectralClass::O,
            1 => SpectralClass::B,
            2 => SpectralClass::A,
            3 => SpectralClass::F,
            4 => SpectralClass::G,
            5 => SpectralClass::K,
            6 => SpectralClass::M,
            7 => SpectralClass::R,
            8 => SpectralClass::S,
            9 => SpectralClass::N,
            10 => SpectralClass::WC,
            11 => SpectralClass::WN,
            12 => SpectralClass::Unknown,
            13 => SpectralClass::L,
            14 => SpectralClass::T,
            15 => SpectralClass::Y,
            16 => SpectralClass::C,
            17 => SpectralClass::WO,
            _ => return None,
        })
    }
}

impl WhiteDwarfClass {
    /// Index within the D family, plain `D` first.
    fn family_index(self) -> u16 {
        match self {
            WhiteDwarfClass::D => 0,
            WhiteDwarfClass::DA => 1,
            WhiteDwarfClass::DB => 2,
            WhiteDwarfClass::DC => 3,
            WhiteDwarfClass::DO => 4,
            WhiteDwarfClass::DQ => 5,
            WhiteDwarfClass::DX => 6,
            WhiteDwarfClass::DZ => 7,
        }
    }

    fn from_family_index(value: u16) -> Option<WhiteDwarfClass> {
        Some(match value {
            0 => WhiteDwarfClass::D,
            1 => WhiteDwarfClass::DA,
            2 => WhiteDwarfClass::DB,
            3 => WhiteDwarfClass::DC,
            4 => WhiteDwarfClass::DO,
            5 => WhiteDwarfClass::DQ,
            6 => WhiteDwarfClass::DX,
            7 => WhiteDwarfClass::DZ,
            _ => return None,
        })
    }
}

impl NeutronStarClass {
    fn family_index(self) -> u16 {
        match self {
            NeutronStarClass::Q => 0,
            NeutronStarClass::QN => 1,
            NeutronStarClass::QP => 2,
            NeutronStarClass::QM => 3,
        }
    }

    fn from_family_index(value: u16) -> Option<NeutronStarClass> {
        Some(match value {
            0 => NeutronStarClass::Q,
            1 => NeutronStarClass::QN,
            2 => NeutronStarClass::QP,
            3 => NeutronStarClass::QM,
            _ => return None,
        })
    }
}

impl LuminosityClass {
    fn wire(self) -> u16 {
        match self {
            LuminosityClass::Ia0 => 0,
            LuminosityClass::Ia => 1,
            LuminosityClass::Ib => 2,
            LuminosityClass::II => 3,
            LuminosityClass::III => 4,
            LuminosityClass::IV => 5,
            LuminosityClass::V => 6,
            LuminosityClass::VI => 7,
            LuminosityClass::Unknown => 8,
        }
    }

    fn from_wire(value: u16) -> LuminosityClass {
        match value {
            0 => LuminosityClass::Ia0,
            1 => LuminosityClass::Ia,
            2 => LuminosityClass::Ib,
            3 => LuminosityClass::II,
            4 => LuminosityClass::III,
            5 => LuminosityClass::IV,
            6 => LuminosityClass::V,
            7 => LuminosityClass::VI,
            _ => LuminosityClass::Unknown,
        }
    }
}

fn subclass_wire(subclass: Option<u8>) -> u16 {
    subclass.map_or(SUBCLASS_UNKNOWN, u16::from)
}

fn subclass_from_wire(value: u16) -> Option<u8> {
    if value <= 9 {
        Some(value as u8)
    } else {
        None
    }
}

impl StellarClass {
    /// Pack into the current (V2) wire form. Infallible.
    ///
    /// The white dwarf field stores `family_index - 1` so the D family
    /// packs densely from zero at `DA`; plain `D` wraps to the top slot
    /// and cannot be decoded back.
    pub fn pack_v2(&self) -> u16 {
        let (star_type, spectral, subclass, luminosity) = match *self {
            StellarClass::NormalStar {
                spectral,
                subclass,
                luminosity,
            } => (
                0u16,
                spectral.ordinal(),
                subclass_wire(subclass),
                luminosity.wire(),
            ),
            StellarClass::WhiteDwarf { spectral, subclass } => (
                1,
                spectral.family_index().wrapping_sub(1) & 0x1f,
                subclass_wire(subclass),
                LuminosityClass::Unknown.wire(),
            ),
            StellarClass::NeutronStar { spectral, subclass } => (
                2,
                spectral.family_index(),
                subclass_wire(subclass),
                LuminosityClass::Unknown.wire(),
            ),
            StellarClass::BlackHole => (
                3,
                SpectralClass::Unknown.ordinal(),
                SUBCLASS_UNKNOWN,
                LuminosityClass::Unknown.wire(),
            ),
        };
        star_type << 13 | (spectral & 0x1f) << 8 | (subclass & 0xf) << 4 | (luminosity & 0xf)
    }

    /// Pack into the legacy (V1) form. Infallible, but lossy: `Y`
    /// stores as `Unknown`, and `WO` does not fit the 4-bit field.
    pub fn pack_v1(&self) -> u16 {
        let (star_type, spectral, subclass, luminosity) = match *self {
            StellarClass::NormalStar {
                spectral,
                subclass,
                luminosity,
            } => {
                let sc = match spectral {
                    SpectralClass::Y => SpectralClass::Unknown.ordinal(),
                    s if s.ordinal() > SpectralClass::Y.ordinal() => s.ordinal() - 1,
                    s => s.ordinal(),
                };
                (0u16, sc, subclass_wire(subclass), luminosity.wire())
            }
            StellarClass::WhiteDwarf { spectral, subclass } => (
                1,
                spectral.family_index().wrapping_sub(1),
                subclass_wire(subclass),
                LuminosityClass::Unknown.wire(),
            ),
            StellarClass::NeutronStar { spectral, subclass } => (
                2,
                spectral.family_index(),
                subclass_wire(subclass),
                LuminosityClass::Unknown.wire(),
            ),
            StellarClass::BlackHole => (
                3,
                SpectralClass::Unknown.ordinal(),
                SUBCLASS_UNKNOWN,
                LuminosityClass::Unknown.wire(),
            ),
        };
        star_type << 12 | (spectral & 0xf) << 8 | (subclass & 0xf) << 4 | (luminosity & 0xf)
    }

    /// Decode the current (V2) wire form.
    pub fn unpack_v2(st: u16) -> Result<StellarClass, DecodeError> {
        match st >> 13 {
            0 => {
                let field = st >> 8 & 0x1f;
                let spectral =
                    SpectralClass::from_ordinal(field).ok_or(DecodeError::SpectralClass {
                        family: "normal star",
                        value: field,
                    })?;
                Ok(StellarClass::NormalStar {
                    spectral,
                    subclass: subclass_from_wire(st >> 4 & 0xf),
                    luminosity: LuminosityClass::from_wire(st & 0xf),
                })
            }
            1 => {
                let field = st >> 8 & 0xf;
                let spectral = if field < WD_CLASS_COUNT {
                    WhiteDwarfClass::from_family_index(field + 1)
                } else {
                    None
                }
                .ok_or(DecodeError::SpectralClass {
                    family: "white dwarf",
                    value: field,
                })?;
                Ok(StellarClass::WhiteDwarf {
                    spectral,
                    subclass: subclass_from_wire(st >> 4 & 0xf),
                })
            }
            2 => {
                let field = st >> 8 & 0xf;
                let spectral = if field < NEUTRON_STAR_CLASS_COUNT {
                    NeutronStarClass::from_family_index(field)
                } else {
                    None
                }
                .ok_or(DecodeError::SpectralClass {
                    family: "neutron star",
                    value: field,
                })?;
                Ok(StellarClass::NeutronStar {
                    spectral,
                    subclass: subclass_from_wire(st >> 4 & 0xf),
                })
            }
            3 => Ok(StellarClass::BlackHole),
            reserved => Err(DecodeError::StarType(reserved)),
        }
    }

    /// Decode the legacy (V1) wire form.
    ///
    /// The slot `Y` later occupied decodes as `C`, preserving pre-Y
    /// catalogs. Neutron-star records derive both the spectral sub-type
    /// and the subclass from bits 7..4, so a stored subclass past `QM`
    /// cannot decode; a catalog hitting that path should be flagged.
    pub fn unpack_v1(st: u16) -> Result<StellarClass, DecodeError> {
        match st >> 12 {
            0 => {
                let field = st >> 8 & 0xf;
                let spectral = if field == SpectralClass::Y.ordinal() {
                    SpectralClass::C
                } else {
                    SpectralClass::from_ordinal(field).ok_or(DecodeError::SpectralClass {
                        family: "normal star",
                        value: field,
                    })?
                };
                Ok(StellarClass::NormalStar {
                    spectral,
                    subclass: subclass_from_wire(st >> 4 & 0xf),
                    luminosity: LuminosityClass::from_wire(st & 0xf),
                })
            }
            1 => {
                let field = st >> 8 & 0xf;
                let spectral = if field < WD_CLASS_COUNT {
                    WhiteDwarfClass::from_family_index(field + 1)
                } else {
                    None
                }
                .ok_or(DecodeError::SpectralClass {
                    family: "white dwarf",
                    value: field,
                })?;
                Ok(StellarClass::WhiteDwarf {
                    spectral,
                    subclass: subclass_from_wire(st >> 4 & 0xf),
                })
            }
            2 => {
                let field = st >> 4 & 0xf;
                let spectral = if field < NEUTRON_STAR_CLASS_COUNT {
                    NeutronStarClass::from_family_index(field)
                } else {
                    None
                }
                .ok_or(DecodeError::SpectralClass {
                    family: "neutron star",
                    value: field,
                })?;
                Ok(StellarClass::NeutronStar {
                    spectral,
                    subclass: subclass_from_wire(field),
                })
            }
            3 => Ok(StellarClass::BlackHole),
            reserved => Err(DecodeError::StarType(reserved)),
        }
    }

    /// Pack using the given catalog revision.
    pub fn pack(&self, version: PackVersion) -> u16 {
        match version {
            PackVersion::V1 => self.pack_v1(),
            PackVersion::V2 => self.pack_v2(),
        }
    }

    /// Decode using the given catalog revision.
    pub fn unpack(version: PackVersion, bits: u16) -> Result<StellarClass, DecodeError> {
        match version {
            PackVersion::V1 => StellarClass::unpack_v1(bits),
            PackVersion::V2 => StellarClass::unpack_v2(bits),
        }
    }
}
