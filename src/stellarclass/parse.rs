//! Forgiving parser for catalog spectral-type strings
//!
//! Spectral-type strings in the Hipparcos catalog are quite irregular,
//! so this is a state machine that never fails: any field it cannot
//! find stays unknown, and extra trailing characters are silently
//! ignored. It reads one character at a time, including a synthetic
//! NUL past the end of the input, and never backtracks.

use std::convert::Infallible;
use std::str::FromStr;

use super::{
    LuminosityClass, NeutronStarClass, SpectralClass, StarType, StellarClass, WhiteDwarfClass,
};

#[derive(Clone, Copy, PartialEq)]
enum State {
    Begin,
    SubdwarfPrefix,
    NormalStarClass,
    WolfRayetType,
    NormalStarSubclass,
    NormalStarSubclassDecimal,
    NormalStarSubclassFinal,
    LumClassBegin,
    LumClassI,
    LumClassII,
    LumClassIdash,
    LumClassIa,
    LumClassV,
    WdType,
    WdExtendedType,
    WdSubclass,
    NeutronStarType,
    NeutronStarExtendedType,
    NeutronStarSubclass,
    End,
}

impl StellarClass {
    /// Parse a spectral-type string.
    ///
    /// Never fails: unparseable input yields a classification whose
    /// fields are unknown.
    pub fn parse(text: &str) -> StellarClass {
        let bytes = text.as_bytes();
        let mut i = 0usize;
        let mut state = State::Begin;

        let mut star_type = StarType::NormalStar;
        let mut spectral = SpectralClass::Unknown;
        let mut wd_class = WhiteDwarfClass::D;
        let mut ns_class = NeutronStarClass::Q;
        let mut subclass: Option<u8> = None;
        let mut luminosity = LuminosityClass::Unknown;

        while state != State::End {
            let c = bytes.get(i).copied().unwrap_or(0);
            match state {
                State::Begin => match c {
                    b'Q' => {
                        star_type = StarType::NeutronStar;
                        ns_class = NeutronStarClass::Q;
                        state = State::NeutronStarType;
                    }
                    b'X' => {
                        star_type = StarType::BlackHole;
                        state = State::End;
                    }
                    b'D' => {
                        star_type = StarType::WhiteDwarf;
                        wd_class = WhiteDwarfClass::D;
                        state = State::WdType;
                        i += 1;
                    }
                    // Hipparcos writes subdwarfs with an sd prefix
                    b's' => {
                        state = State::SubdwarfPrefix;
                        i += 1;
                    }
                    b'?' => state = State::End,
                    _ => state = State::NormalStarClass,
                },

                State::SubdwarfPrefix => {
                    if c == b'd' {
                        luminosity = LuminosityClass::VI;
                        state = State::NormalStarClass;
                        i += 1;
                    } else {
                        state = State::End;
                    }
                }

                State::NormalStarClass => {
                    match c {
                        b'W' => state = State::WolfRayetType,
                        b'O' => {
                            spectral = SpectralClass::O;
                            state = State::NormalStarSubclass;
                        }
                        b'B' => {
                            spectral = SpectralClass::B;
                            state = State::NormalStarSubclass;
                        }
                        b'A' => {
                            spectral = SpectralClass::A;
                            state = State::NormalStarSubclass;
                        }
                        b'F' => {
                            spectral = SpectralClass::F;
                            state = State::NormalStarSubclass;
                        }
                        b'G' => {
                            spectral = SpectralClass::G;
                            state = State::NormalStarSubclass;
                        }
                        b'K' => {
                            spectral = SpectralClass::K;
                            state = State::NormalStarSubclass;
                        }
                        b'M' => {
                            spectral = SpectralClass::M;
                            state = State::NormalStarSubclass;
                        }
                        b'R' => {
                            spectral = SpectralClass::R;
                            state = State::NormalStarSubclass;
                        }
                        b'S' => {
                            spectral = SpectralClass::S;
                            state = State::NormalStarSubclass;
                        }
                        b'N' => {
                            spectral = SpectralClass::N;
                            state = State::NormalStarSubclass;
                        }
                        b'L' => {
                            spectral = SpectralClass::L;
                            state = State::NormalStarSubclass;
                        }
                        b'T' => {
                            spectral = SpectralClass::T;
                            state = State::NormalStarSubclass;
                        }
                        b'Y' => {
                            spectral = SpectralClass::Y;
                            state = State::NormalStarSubclass;
                        }
                        b'C' => {
                            spectral = SpectralClass::C;
                            state = State::NormalStarSubclass;
                        }
                        _ => state = State::End,
                    }
                    i += 1;
                }

                State::WolfRayetType => match c {
                    b'C' => {
                        spectral = SpectralClass::WC;
                        state = State::NormalStarSubclass;
                        i += 1;
                    }
                    b'N' => {
                        spectral = SpectralClass::WN;
                        state = State::NormalStarSubclass;
                        i += 1;
                    }
                    b'O' => {
                        spectral = SpectralClass::WO;
                        state = State::NormalStarSubclass;
                        i += 1;
                    }
                    _ => {
                        spectral = SpectralClass::WC;
                        state = State::NormalStarSubclass;
                    }
                },

                State::NormalStarSubclass => {
                    if c.is_ascii_digit() {
                        subclass = Some(c - b'0');
                        state = State::NormalStarSubclassDecimal;
                        i += 1;
                    } else {
                        state = State::LumClassBegin;
                    }
                }

                State::NormalStarSubclassDecimal => {
                    if c == b'.' {
                        state = State::NormalStarSubclassFinal;
                        i += 1;
                    } else {
                        state = State::LumClassBegin;
                    }
                }

                // the fractional digit is discarded; the integer
                // subclass stands
                State::NormalStarSubclassFinal => {
                    state = if c.is_ascii_digit() {
                        State::LumClassBegin
                    } else {
                        State::End
                    };
                    i += 1;
                }

                State::LumClassBegin => {
                    match c {
                        // canonical renders separate the luminosity class
                        b' ' => {}
                        b'I' => state = State::LumClassI,
                        b'V' => state = State::LumClassV,
                        _ => state = State::End,
                    }
                    i += 1;
                }

                State::LumClassI => {
                    match c {
                        b'I' => state = State::LumClassII,
                        b'V' => {
                            luminosity = LuminosityClass::IV;
                            state = State::End;
                        }
                        b'a' => state = State::LumClassIa,
                        b'b' => {
                            luminosity = LuminosityClass::Ib;
                            state = State::End;
                        }
                        b'-' => state = State::LumClassIdash,
                        _ => {
                            luminosity = LuminosityClass::Ib;
                            state = State::End;
                        }
                    }
                    i += 1;
                }

                State::LumClassII => match c {
                    b'I' => {
                        luminosity = LuminosityClass::III;
                        state = State::End;
                        i += 1;
                    }
                    // deliberately left unconsumed
                    _ => {
                        luminosity = LuminosityClass::II;
                        state = State::End;
                    }
                },

                State::LumClassIdash => match c {
                    b'a' => {
                        state = State::LumClassIa;
                        i += 1;
                    }
                    b'b' => {
                        luminosity = LuminosityClass::Ib;
                        state = State::End;
                        i += 1;
                    }
                    _ => {
                        luminosity = LuminosityClass::Ib;
                        state = State::End;
                    }
                },

                State::LumClassIa => match c {
                    b'0' => {
                        luminosity = LuminosityClass::Ia0;
                        state = State::End;
                    }
                    _ => {
                        luminosity = LuminosityClass::Ia;
                        state = State::End;
                    }
                },

                State::LumClassV => match c {
                    b'I' => {
                        luminosity = LuminosityClass::VI;
                        state = State::End;
                    }
                    _ => {
                        luminosity = LuminosityClass::V;
                        state = State::End;
                    }
                },

                State::WdType => {
                    match c {
                        b'A' => {
                            wd_class = WhiteDwarfClass::DA;
                            i += 1;
                        }
                        b'B' => {
                            wd_class = WhiteDwarfClass::DB;
                            i += 1;
                        }
                        b'C' => {
                            wd_class = WhiteDwarfClass::DC;
                            i += 1;
                        }
                        b'O' => {
                            wd_class = WhiteDwarfClass::DO;
                            i += 1;
                        }
                        b'Q' => {
                            wd_class = WhiteDwarfClass::DQ;
                            i += 1;
                        }
                        b'X' => {
                            wd_class = WhiteDwarfClass::DX;
                            i += 1;
                        }
                        b'Z' => {
                            wd_class = WhiteDwarfClass::DZ;
                            i += 1;
                        }
                        _ => wd_class = WhiteDwarfClass::D,
                    }
                    state = State::WdExtendedType;
                }

                // chemical, variability, and magnetic suffixes, discarded
                State::WdExtendedType => match c {
                    b'A' | b'B' | b'C' | b'O' | b'Q' | b'Z' | b'X' | b'V' | b'P' | b'H'
                    | b'E' => i += 1,
                    _ => state = State::WdSubclass,
                },

                State::WdSubclass => {
                    if c.is_ascii_digit() {
                        subclass = Some(c - b'0');
                        i += 1;
                    }
                    state = State::End;
                }

                State::NeutronStarType => {
                    match c {
                        b'N' => {
                            ns_class = NeutronStarClass::QN;
                            i += 1;
                        }
                        b'P' => {
                            ns_class = NeutronStarClass::QP;
                            i += 1;
                        }
                        b'M' => {
                            ns_class = NeutronStarClass::QM;
                            i += 1;
                        }
                        _ => ns_class = NeutronStarClass::Q,
                    }
                    state = State::NeutronStarExtendedType;
                }

                // pulsar, magnetar, and non-pulsating suffixes, discarded
                State::NeutronStarExtendedType => match c {
                    b'P' | b'M' | b'N' => i += 1,
                    _ => state = State::NeutronStarSubclass,
                },

                State::NeutronStarSubclass => {
                    if c.is_ascii_digit() {
                        subclass = Some(c - b'0');
                        i += 1;
                    }
                    state = State::End;
                }

                State::End => unreachable!(),
            }
        }

        match star_type {
            StarType::NormalStar => StellarClass::NormalStar {
                spectral,
                subclass,
                luminosity,
            },
            StarType::WhiteDwarf => StellarClass::WhiteDwarf {
                spectral: wd_class,
                subclass,
            },
            StarType::NeutronStar => StellarClass::NeutronStar {
                spectral: ns_class,
                subclass,
            },
            StarType::BlackHole => StellarClass::BlackHole,
        }
    }
}

impl FromStr for StellarClass {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Infallible> {
        Ok(StellarClass::parse(s))
    }
}
