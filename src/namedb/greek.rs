//! Greek letters for Bayer designations
//!
//! Catalog star names carry a leading Greek letter in one of three
//! shapes: the three-letter catalog abbreviation ("ALF Ori"), the
//! spelled name ("Alpha Ori"), or the letter itself ("α Ori").
//! [`canonicalize`] rewrites the first word to the letter form so all
//! three compare equal, keeping any trailing component digit ("ALF2
//! Cen" → "α2 Cen").

use std::collections::HashMap;

use lazy_static::lazy_static;

/// (catalog abbreviation, spelled name, letter)
const GREEK_LETTERS: [(&str, &str, &str); 24] = [
    ("ALF", "Alpha", "α"),
    ("BET", "Beta", "β"),
    ("GAM", "Gamma", "γ"),
    ("DEL", "Delta", "δ"),
    ("EPS", "Epsilon", "ε"),
    ("ZET", "Zeta", "ζ"),
    ("ETA", "Eta", "η"),
    ("TET", "Theta", "θ"),
    ("IOT", "Iota", "ι"),
    ("KAP", "Kappa", "κ"),
    ("LAM", "Lambda", "λ"),
    ("MU", "Mu", "μ"),
    ("NU", "Nu", "ν"),
    ("XI", "Xi", "ξ"),
    ("OMI", "Omicron", "ο"),
    ("PI", "Pi", "π"),
    ("RHO", "Rho", "ρ"),
    ("SIG", "Sigma", "σ"),
    ("TAU", "Tau", "τ"),
    ("UPS", "Upsilon", "υ"),
    ("PHI", "Phi", "φ"),
    ("CHI", "Chi", "χ"),
    ("PSI", "Psi", "ψ"),
    ("OME", "Omega", "ω"),
];

lazy_static! {
    static ref LETTER_BY_WORD: HashMap<String, &'static str> = {
        let mut m = HashMap::new();
        for &(abbrev, name, letter) in GREEK_LETTERS.iter() {
            m.insert(abbrev.to_lowercase(), letter);
            m.insert(name.to_lowercase(), letter);
            m.insert(letter.to_string(), letter);
        }
        m
    };
}

/// Rewrite a leading Greek word, with an optional trailing component
/// digit, to the letter form. Names with no Greek prefix come back
/// unchanged.
pub fn canonicalize(name: &str) -> String {
    let (word, rest) = match name.find(' ') {
        Some(pos) => (&name[..pos], &name[pos..]),
        None => (name, ""),
    };
    let digits_at = word
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(word.len());
    let (base, digits) = word.split_at(digits_at);
    if base.is_empty() {
        return name.to_string();
    }
    match LETTER_BY_WORD.get(&base.to_lowercase()) {
        Some(letter) => format!("{letter}{digits}{rest}"),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviation_and_name_forms() {
        assert_eq!(canonicalize("ALF Ori"), "α Ori");
        assert_eq!(canonicalize("Alpha Ori"), "α Ori");
        assert_eq!(canonicalize("alpha Ori"), "α Ori");
        assert_eq!(canonicalize("α Ori"), "α Ori");
    }

    #[test]
    fn test_component_digits_kept() {
        assert_eq!(canonicalize("ALF2 Cen"), "α2 Cen");
        assert_eq!(canonicalize("PSI1 Aqr"), "ψ1 Aqr");
    }

    #[test]
    fn test_short_abbreviations() {
        assert_eq!(canonicalize("MU Cep"), "μ Cep");
        assert_eq!(canonicalize("XI Per"), "ξ Per");
    }

    #[test]
    fn test_non_greek_names_unchanged() {
        assert_eq!(canonicalize("Polaris"), "Polaris");
        assert_eq!(canonicalize("61 Cyg"), "61 Cyg");
        assert_eq!(canonicalize("HIP 87937"), "HIP 87937");
        assert_eq!(canonicalize(""), "");
    }

    #[test]
    fn test_bare_greek_word() {
        assert_eq!(canonicalize("Omega"), "ω");
    }
}
