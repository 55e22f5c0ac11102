//! Bidirectional star-name index
//!
//! Maps display names to catalog index numbers and back. Lookup is
//! case-insensitive, a localized overlay is consulted first for
//! translated UIs, Greek Bayer prefixes are normalized on entry, and
//! ordered prefix completion backs console input.
//!
//! # Example
//!
//! ```
//! use starlore::namedb::NameDatabase;
//!
//! let mut db = NameDatabase::new();
//! db.add(32349, "ALF CMa", true);
//! db.add(32349, "Sirius", true);
//! assert_eq!(db.lookup_by_name("α CMa", false), Some(32349));
//! assert_eq!(db.lookup_by_name("sirius", false), Some(32349));
//! assert_eq!(db.lookup_by_index(32349), Some("α CMa"));
//! ```

pub mod greek;

use std::collections::BTreeMap;

/// Catalog index number
pub type IndexNumber = u32;

#[derive(Clone, Debug)]
struct NameEntry {
    display: String,
    index: IndexNumber,
}

/// Bidirectional mapping between catalog index numbers and display
/// names.
#[derive(Clone, Debug, Default)]
pub struct NameDatabase {
    /// folded name → entry
    name_index: BTreeMap<String, NameEntry>,
    /// folded localized name → entry, consulted first when i18n
    localized_index: BTreeMap<String, NameEntry>,
    /// index → names in registration order
    number_index: BTreeMap<IndexNumber, Vec<String>>,
}

impl NameDatabase {
    pub fn new() -> NameDatabase {
        NameDatabase::default()
    }

    /// Number of primary names registered.
    pub fn len(&self) -> usize {
        self.name_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_index.is_empty()
    }

    /// Register `name` for a catalog index. With `parse_greek`, a
    /// leading Bayer word is rewritten to its Greek letter first, so
    /// "ALF Ori", "Alpha Ori", and "α Ori" all land on one entry.
    pub fn add(&mut self, index: IndexNumber, name: &str, parse_greek: bool) {
        let display = if parse_greek {
            greek::canonicalize(name)
        } else {
            name.to_string()
        };
        self.name_index.insert(
            display.to_lowercase(),
            NameEntry {
                display: display.clone(),
                index,
            },
        );
        self.number_index.entry(index).or_default().push(display);
    }

    /// Register a translated name, consulted ahead of the primary index
    /// by i18n-aware lookups.
    pub fn add_localized(&mut self, index: IndexNumber, name: &str) {
        let display = greek::canonicalize(name);
        self.localized_index
            .insert(display.to_lowercase(), NameEntry { display, index });
    }

    /// Drop every name attached to `index`.
    pub fn erase(&mut self, index: IndexNumber) {
        if let Some(names) = self.number_index.remove(&index) {
            for name in names {
                let key = name.to_lowercase();
                if self.name_index.get(&key).map(|e| e.index) == Some(index) {
                    self.name_index.remove(&key);
                }
            }
        }
        self.localized_index.retain(|_, e| e.index != index);
    }

    /// Case-insensitive name lookup. The localized overlay wins when
    /// `i18n` is set; a Greek-normalized form of the query is tried if
    /// the literal one misses.
    pub fn lookup_by_name(&self, name: &str, i18n: bool) -> Option<IndexNumber> {
        self.lookup_exact(name, i18n).or_else(|| {
            let canonical = greek::canonicalize(name);
            if canonical == name {
                None
            } else {
                self.lookup_exact(&canonical, i18n)
            }
        })
    }

    fn lookup_exact(&self, name: &str, i18n: bool) -> Option<IndexNumber> {
        let key = name.to_lowercase();
        if i18n {
            if let Some(entry) = self.localized_index.get(&key) {
                return Some(entry.index);
            }
        }
        self.name_index.get(&key).map(|e| e.index)
    }

    /// Primary (first-registered) name for an index.
    pub fn lookup_by_index(&self, index: IndexNumber) -> Option<&str> {
        self.number_index
            .get(&index)
            .and_then(|names| names.first())
            .map(String::as_str)
    }

    /// All names registered for an index, in registration order.
    pub fn names_for_index(&self, index: IndexNumber) -> impl Iterator<Item = &str> {
        self.number_index
            .get(&index)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Display names starting with `prefix`, case-insensitively, in
    /// index order. With `greek_expansion`, a leading Bayer word in the
    /// prefix is also tried in letter form, so "alf" completes "α"
    /// names. Localized matches come first when `i18n` is set.
    pub fn completion(&self, prefix: &str, i18n: bool, greek_expansion: bool) -> Vec<String> {
        let mut prefixes = vec![prefix.to_lowercase()];
        if greek_expansion {
            let expanded = greek::canonicalize(prefix).to_lowercase();
            if !prefixes.contains(&expanded) {
                prefixes.push(expanded);
            }
        }

        let mut out = Vec::new();
        for p in &prefixes {
            if p.is_empty() {
                continue;
            }
            if i18n {
                scan_prefix(&self.localized_index, p, &mut out);
            }
            scan_prefix(&self.name_index, p, &mut out);
        }
        out
    }
}

/// Collect display names under `folded` prefix, preserving map order
/// and skipping duplicates already gathered.
fn scan_prefix(map: &BTreeMap<String, NameEntry>, folded: &str, out: &mut Vec<String>) {
    for (key, entry) in map.range(folded.to_string()..) {
        if !key.starts_with(folded) {
            break;
        }
        if !out.iter().any(|name| name == &entry.display) {
            out.push(entry.display.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_db() -> NameDatabase {
        let mut db = NameDatabase::new();
        db.add(32349, "ALF CMa", true);
        db.add(32349, "Sirius", true);
        db.add(27989, "ALF Ori", true);
        db.add(27989, "Betelgeuse", true);
        db.add(24436, "BET Ori", true);
        db.add(24436, "Rigel", true);
        db.add(11767, "Polaris", true);
        db
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let db = sample_db();
        assert_eq!(db.lookup_by_name("sirius", false), Some(32349));
        assert_eq!(db.lookup_by_name("SIRIUS", false), Some(32349));
        assert_eq!(db.lookup_by_name("Vega", false), None);
    }

    #[test]
    fn test_greek_forms_unify() {
        let db = sample_db();
        for query in ["ALF Ori", "alf ori", "Alpha Ori", "α Ori"] {
            assert_eq!(db.lookup_by_name(query, false), Some(27989), "{query}");
        }
    }

    #[test]
    fn test_lookup_by_index_is_first_registered() {
        let db = sample_db();
        assert_eq!(db.lookup_by_index(32349), Some("α CMa"));
        assert_eq!(db.lookup_by_index(11767), Some("Polaris"));
        assert_eq!(db.lookup_by_index(99999), None);
    }

    #[test]
    fn test_names_for_index_in_registration_order() {
        let db = sample_db();
        let names: Vec<&str> = db.names_for_index(27989).collect();
        assert_eq!(names, ["α Ori", "Betelgeuse"]);
        assert_eq!(db.names_for_index(99999).count(), 0);
    }

    #[test]
    fn test_erase_removes_both_directions() {
        let mut db = sample_db();
        db.erase(27989);
        assert_eq!(db.lookup_by_name("Betelgeuse", false), None);
        assert_eq!(db.lookup_by_name("ALF Ori", false), None);
        assert_eq!(db.lookup_by_index(27989), None);
        // neighbors survive
        assert_eq!(db.lookup_by_name("Sirius", false), Some(32349));
    }

    #[test]
    fn test_completion_ordered_prefix_matches() {
        let db = sample_db();
        let matches = db.completion("α", false, false);
        assert_eq!(matches, ["α CMa", "α Ori"]);

        let matches = db.completion("po", false, false);
        assert_eq!(matches, ["Polaris"]);

        assert!(db.completion("zz", false, false).is_empty());
        assert!(db.completion("", false, false).is_empty());
    }

    #[test]
    fn test_completion_greek_expansion() {
        let db = sample_db();
        // "alf" only matches letter-form entries through expansion
        assert!(db.completion("alf", false, false).is_empty());
        let matches = db.completion("alf", false, true);
        assert_eq!(matches, ["α CMa", "α Ori"]);
    }

    #[test]
    fn test_localized_overlay() {
        let mut db = sample_db();
        db.add_localized(11767, "Nordstern");
        assert_eq!(db.lookup_by_name("nordstern", true), Some(11767));
        assert_eq!(db.lookup_by_name("nordstern", false), None);

        let matches = db.completion("nord", true, false);
        assert_eq!(matches, ["Nordstern"]);
        assert!(db.completion("nord", false, false).is_empty());

        db.erase(11767);
        assert_eq!(db.lookup_by_name("nordstern", true), None);
    }

    #[test]
    fn test_reregistration_overwrites_name() {
        let mut db = NameDatabase::new();
        db.add(1, "Twin", true);
        db.add(2, "Twin", true);
        // the newest registration wins the name
        assert_eq!(db.lookup_by_name("twin", false), Some(2));
        // erasing the old index leaves the new owner in place
        db.erase(1);
        assert_eq!(db.lookup_by_name("twin", false), Some(2));
    }

    #[test]
    fn test_len_counts_primary_names() {
        let mut db = NameDatabase::new();
        assert!(db.is_empty());
        db.add(1, "One", true);
        db.add(1, "Uno", true);
        assert_eq!(db.len(), 2);
    }
}
