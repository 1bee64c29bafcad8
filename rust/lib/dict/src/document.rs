use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::warn;

use crate::entry::Entry;
use crate::error::ParseError;
use crate::header::{self, FoamHeader};
use crate::lexer;
use crate::parser;

/// Key under which OpenFOAM files carry their header block.
const FOAM_FILE: &str = "FoamFile";

/// One OpenFOAM dictionary: an ordered set of uniquely keyed entries plus the
/// `FoamFile` header it is written with.
///
/// Keys keep insertion order. Assigning an existing key replaces the value in
/// place, so a later duplicate in parsed text wins but keeps the position of
/// the first occurrence.
///
/// Lookups and inserts go through a key index; `remove` shifts the entries
/// after the removed one and is linear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DictionaryDocument {
    entries: Vec<(String, Entry)>,
    /// Key to position in `entries`.
    index: HashMap<String, usize>,
    header: FoamHeader,
}

impl DictionaryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse OpenFOAM dictionary text.
    ///
    /// Everything up to and including the first ruler comment is treated as
    /// the header; its `FoamFile` block (if any) fills [`FoamHeader`]. Without
    /// a ruler the whole text is body, and a top-level `FoamFile` block found
    /// there is lifted into the header instead.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let split = header::find_ruler(text).and_then(|(offset, first_line)| {
            let body = lexer::logical_lines(&text[offset..], first_line);
            // A ruler with nothing after it is a footer.
            (!body.is_empty()).then(|| (&text[..offset], body))
        });

        let (mut doc, header_block) = match split {
            Some((head, body)) => {
                let doc = parser::parse_lines(&body)?;
                let block = match parser::parse_lines(&lexer::logical_lines(head, 1)) {
                    Ok(mut head_doc) => take_foam_file(&mut head_doc),
                    Err(e) => {
                        warn!("ignoring malformed header: {}", e);
                        None
                    }
                };
                (doc, block)
            }
            None => {
                let mut doc = parser::parse_lines(&lexer::logical_lines(text, 1))?;
                let block = take_foam_file(&mut doc);
                (doc, block)
            }
        };

        if let Some(block) = header_block {
            doc.header = FoamHeader::from_dict(&block);
        }
        Ok(doc)
    }

    pub fn header(&self) -> &FoamHeader {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut FoamHeader {
        &mut self.header
    }

    pub fn set_header_object(&mut self, object: impl Into<String>) {
        self.header.object = Some(object.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.position(key).map(|idx| &self.entries[idx].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Entry> {
        self.position(key).map(|idx| &mut self.entries[idx].1)
    }

    /// Set `key` to `entry`, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, entry: impl Into<Entry>) -> Option<Entry> {
        let key = key.into();
        let entry = entry.into();
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].1, entry)),
            None => {
                self.push(key, entry);
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Entry> {
        let idx = self.index.remove(key)?;
        let (_, entry) = self.entries.remove(idx);
        for (pos, (key, _)) in self.entries.iter().enumerate().skip(idx) {
            if let Some(slot) = self.index.get_mut(key) {
                *slot = pos;
            }
        }
        Some(entry)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Scalar text for `key`, or `None` if absent or a sub-dictionary.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_scalar()
    }

    pub fn subdict(&self, key: &str) -> Option<&DictionaryDocument> {
        self.get(key)?.as_dict()
    }

    pub fn subdict_mut(&mut self, key: &str) -> Option<&mut DictionaryDocument> {
        self.get_mut(key)?.as_dict_mut()
    }

    /// Sub-dictionary for `key`, created empty if missing. A scalar already
    /// stored under `key` is replaced.
    pub fn subdict_or_insert(&mut self, key: &str) -> &mut DictionaryDocument {
        let idx = match self.position(key) {
            Some(idx) => {
                if !self.entries[idx].1.is_dict() {
                    self.entries[idx].1 = Entry::Dict(DictionaryDocument::new());
                }
                idx
            }
            None => self.push(key.to_string(), Entry::Dict(DictionaryDocument::new())),
        };
        match &mut self.entries[idx].1 {
            Entry::Dict(doc) => doc,
            Entry::Scalar(_) => unreachable!("entry was just made a dictionary"),
        }
    }

    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key)?.as_float()
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key)?.as_bool()
    }

    /// Look up a scoped key such as `solvers/p/tolerance`.
    pub fn lookup(&self, path: &str) -> Option<&Entry> {
        let mut parts = path.split('/');
        let mut entry = self.get(parts.next()?)?;
        for part in parts {
            entry = entry.as_dict()?.get(part)?;
        }
        Some(entry)
    }

    /// Assign a scoped key, creating intermediate sub-dictionaries as needed.
    pub fn set_path(&mut self, path: &str, entry: impl Into<Entry>) -> Option<Entry> {
        match path.rsplit_once('/') {
            None => self.insert(path, entry),
            Some((parent, leaf)) => {
                let mut doc = self;
                for part in parent.split('/') {
                    doc = doc.subdict_or_insert(part);
                }
                doc.insert(leaf, entry)
            }
        }
    }

    /// Remove a scoped key. Intermediate sub-dictionaries are left in place.
    pub fn remove_path(&mut self, path: &str) -> Option<Entry> {
        match path.rsplit_once('/') {
            None => self.remove(path),
            Some((parent, leaf)) => {
                let mut doc = self;
                for part in parent.split('/') {
                    doc = doc.subdict_mut(part)?;
                }
                doc.remove(leaf)
            }
        }
    }

    /// True when both documents hold the same entries, ignoring headers.
    pub fn same_entries(&self, other: &DictionaryDocument) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|((ka, a), (kb, b))| {
                    ka == kb
                        && match (a, b) {
                            (Entry::Scalar(x), Entry::Scalar(y)) => x == y,
                            (Entry::Dict(x), Entry::Dict(y)) => x.same_entries(y),
                            _ => false,
                        }
                })
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    fn push(&mut self, key: String, entry: Entry) -> usize {
        let idx = self.entries.len();
        self.index.insert(key.clone(), idx);
        self.entries.push((key, entry));
        idx
    }
}

fn take_foam_file(doc: &mut DictionaryDocument) -> Option<DictionaryDocument> {
    if doc.subdict(FOAM_FILE).is_some() {
        doc.remove(FOAM_FILE).and_then(Entry::into_dict)
    } else {
        None
    }
}

/// Serializes as an ordered map: scalars become strings, sub-dictionaries
/// nested maps. The header is not included.
impl Serialize for DictionaryDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Entry::Scalar(value) => serializer.serialize_str(value),
            Entry::Dict(doc) => Serialize::serialize(doc, serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTROL_DICT: &str = r#"/*--------------------------------*- C++ -*----------------------------------*\
| =========                 |                                                 |
| \\      /  F ield         | OpenFOAM: The Open Source CFD Toolbox           |
|  \\    /   O peration     | Version:  v2012                                 |
|   \\  /    A nd           | Website:  www.openfoam.com                      |
|    \\/     M anipulation  |                                                 |
\*---------------------------------------------------------------------------*/
FoamFile
{
    version     2.0;
    format      ascii;
    class       dictionary;
    location    "system";
    object      controlDict;
}
// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * //

application     simpleFoam;
startFrom       startTime;
startTime       0;
stopAt          endTime;
endTime         1000;
runTimeModifiable true;

// ************************************************************************* //
"#;

    const BODY: &str = "\
application     simpleFoam;
startFrom       startTime;
startTime       0;
stopAt          endTime;
endTime         1000;
runTimeModifiable true;
";

    #[test]
    fn parses_control_dict_with_header() {
        let doc = DictionaryDocument::parse(CONTROL_DICT).unwrap();
        assert_eq!(doc.scalar("application"), Some("simpleFoam"));
        assert_eq!(doc.scalar("endTime"), Some("1000"));
        assert_eq!(doc.get_bool("runTimeModifiable"), Some(true));
        assert!(!doc.contains_key("FoamFile"));
        assert_eq!(doc.header().object.as_deref(), Some("controlDict"));
        assert_eq!(doc.header().location.as_deref(), Some("\"system\""));
    }

    #[test]
    fn header_skip_is_idempotent() {
        let with_header = DictionaryDocument::parse(CONTROL_DICT).unwrap();
        let without = DictionaryDocument::parse(BODY).unwrap();
        assert!(with_header.same_entries(&without));
        assert_eq!(without.header(), &FoamHeader::default());
    }

    #[test]
    fn foam_file_without_ruler_becomes_header() {
        let text = "FoamFile\n{\n    class volVectorField;\n    object U;\n}\ninternalField uniform (0 0 0);\n";
        let doc = DictionaryDocument::parse(text).unwrap();
        assert_eq!(doc.keys().collect::<Vec<_>>(), ["internalField"]);
        assert_eq!(doc.header().class, "volVectorField");
        assert_eq!(doc.scalar("internalField"), Some("uniform (0 0 0)"));
    }

    #[test]
    fn footer_only_ruler_keeps_body() {
        let text = format!("{BODY}// ************************************************************************* //\n");
        let doc = DictionaryDocument::parse(&text).unwrap();
        assert_eq!(doc.len(), 6);
    }

    #[test]
    fn nested_block_fidelity() {
        let text = "solvers{p{solver GAMG; tolerance 1e-6;} U{solver smoothSolver;}}";
        let doc = DictionaryDocument::parse(text).unwrap();
        let solvers = doc.subdict("solvers").unwrap();
        assert_eq!(solvers.keys().collect::<Vec<_>>(), ["p", "U"]);
        let p = solvers.subdict("p").unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(p.scalar("solver"), Some("GAMG"));
        assert_eq!(p.scalar("tolerance"), Some("1e-6"));
        let u = solvers.subdict("U").unwrap();
        assert_eq!(u.len(), 1);
        assert_eq!(u.scalar("solver"), Some("smoothSolver"));
    }

    #[test]
    fn nested_block_fidelity_openfoam_layout() {
        let text = "\
solvers
{
    p
    {
        solver          GAMG;
        tolerance       1e-6;
    }
    U
    {
        solver          smoothSolver;
    }
}
";
        let inline = DictionaryDocument::parse(
            "solvers{p{solver GAMG; tolerance 1e-6;} U{solver smoothSolver;}}",
        )
        .unwrap();
        assert!(DictionaryDocument::parse(text).unwrap().same_entries(&inline));
    }

    #[test]
    fn unterminated_block_fails() {
        let err = DictionaryDocument::parse("foo { bar 1;").unwrap_err();
        assert!(matches!(err, ParseError::Unterminated { ref key, line: 1 } if key == "foo"));
    }

    #[test]
    fn comment_is_stripped_from_value() {
        let doc = DictionaryDocument::parse("tolerance 1e-6; // relative").unwrap();
        assert_eq!(doc.scalar("tolerance"), Some("1e-6"));
    }

    #[test]
    fn duplicate_key_last_write_wins() {
        let doc = DictionaryDocument::parse("foo 1;\nbar x;\nfoo 2;").unwrap();
        assert_eq!(doc.scalar("foo"), Some("2"));
        assert_eq!(doc.keys().collect::<Vec<_>>(), ["foo", "bar"]);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut doc = DictionaryDocument::new();
        doc.insert("a", "1");
        doc.insert("b", "2");
        assert_eq!(doc.insert("a", "3"), Some(Entry::from("1")));
        assert_eq!(doc.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(doc.remove("a"), Some(Entry::from("3")));
        assert_eq!(doc.keys().collect::<Vec<_>>(), ["b"]);
    }

    #[test]
    fn scoped_paths() {
        let mut doc = DictionaryDocument::new();
        assert_eq!(doc.set_path("SIMPLE/residualControl/p", "1e-4"), None);
        doc.set_path("SIMPLE/consistent", "true");
        assert_eq!(doc.lookup("SIMPLE/residualControl/p").and_then(Entry::as_float), Some(1e-4));
        assert_eq!(doc.subdict("SIMPLE").unwrap().get_bool("consistent"), Some(true));
        assert!(doc.lookup("SIMPLE/missing/p").is_none());
        assert!(doc.lookup("SIMPLE/consistent/deeper").is_none());

        assert_eq!(doc.remove_path("SIMPLE/residualControl/p"), Some(Entry::from("1e-4")));
        assert!(doc.subdict("SIMPLE").unwrap().subdict("residualControl").unwrap().is_empty());
        assert_eq!(doc.remove_path("nope/p"), None);
    }

    #[test]
    fn subdict_or_insert_replaces_scalar() {
        let mut doc = DictionaryDocument::new();
        doc.insert("solvers", "none");
        doc.subdict_or_insert("solvers").insert("p", "x");
        assert_eq!(doc.lookup("solvers/p").and_then(Entry::as_scalar), Some("x"));
    }

    #[test]
    fn serializes_to_ordered_json() {
        let mut doc = DictionaryDocument::new();
        doc.insert("zeta", "1");
        doc.set_path("alpha/beta", "Gauss linear");
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"{"zeta":"1","alpha":{"beta":"Gauss linear"}}"#);
    }

    #[test]
    fn index_follows_removals() {
        let mut doc = DictionaryDocument::new();
        for i in 0..1_000 {
            doc.insert(format!("k{i}"), i.to_string());
        }
        assert_eq!(doc.remove("k10"), Some(Entry::from("10")));
        assert_eq!(doc.remove("k10"), None);
        assert_eq!(doc.len(), 999);

        assert_eq!(doc.scalar("k11"), Some("11"));
        assert_eq!(doc.scalar("k999"), Some("999"));
        assert_eq!(doc.insert("k500", "x"), Some(Entry::from("500")));
        doc.insert("k10", "back");

        let keys: Vec<&str> = doc.keys().collect();
        assert_eq!(keys[9..12], ["k9", "k11", "k12"]);
        assert_eq!(keys[499], "k500");
        assert_eq!(keys.last(), Some(&"k10"));
        assert_eq!(doc.scalar("k500"), Some("x"));
        assert_eq!(doc.scalar("k10"), Some("back"));
    }
}
