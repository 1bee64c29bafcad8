//! The `FoamFile` boilerplate that opens every OpenFOAM dictionary file.
//!
//! ```text
//! /*--------------------------------*- C++ -*----------------------------------*\
//! ...banner...
//! \*---------------------------------------------------------------------------*/
//! FoamFile
//! {
//!     version     2.0;
//!     format      ascii;
//!     class       dictionary;
//!     object      controlDict;
//! }
//! // * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * //
//! ```

use crate::document::DictionaryDocument;

const BANNER: &str = r"/*--------------------------------*- C++ -*----------------------------------*\
| =========                 |                                                 |
| \\      /  F ield         | OpenFOAM: The Open Source CFD Toolbox           |
|  \\    /   O peration     | Version:  v2106                                 |
|   \\  /    A nd           | Website:  www.openfoam.com                      |
|    \\/     M anipulation  |                                                 |
\*---------------------------------------------------------------------------*/
";

/// Divider between the header and the body.
pub const HEADER_RULER: &str =
    "// * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * * //";

/// Closing line written after the body.
pub const FOOTER_RULER: &str =
    "// ************************************************************************* //";

/// Object name written when a document was never given one.
pub const DEFAULT_OBJECT: &str = "dictionary";

/// Fields of the `FoamFile` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoamHeader {
    pub version: String,
    pub format: String,
    pub class: String,
    /// Written verbatim, quotes included (`"system"`).
    pub location: Option<String>,
    pub object: Option<String>,
}

impl Default for FoamHeader {
    fn default() -> Self {
        Self {
            version: "2.0".into(),
            format: "ascii".into(),
            class: "dictionary".into(),
            location: None,
            object: None,
        }
    }
}

impl FoamHeader {
    /// Build a header from a parsed `FoamFile` block. Missing fields keep
    /// their defaults; unknown fields are ignored.
    pub fn from_dict(block: &DictionaryDocument) -> Self {
        let mut header = Self::default();
        for (key, entry) in block.iter() {
            let Some(value) = entry.as_scalar() else {
                continue;
            };
            match key {
                "version" => header.version = value.to_string(),
                "format" => header.format = value.to_string(),
                "class" => header.class = value.to_string(),
                "location" => header.location = Some(value.to_string()),
                "object" => header.object = Some(value.to_string()),
                _ => {}
            }
        }
        header
    }

    pub fn object_name(&self) -> &str {
        self.object.as_deref().unwrap_or(DEFAULT_OBJECT)
    }

    pub(crate) fn write_to(&self, out: &mut String) {
        out.push_str(BANNER);
        out.push_str("FoamFile\n{\n");
        push_field(out, "version", &self.version);
        push_field(out, "format", &self.format);
        push_field(out, "class", &self.class);
        if let Some(location) = &self.location {
            push_field(out, "location", location);
        }
        push_field(out, "object", self.object_name());
        out.push_str("}\n");
        out.push_str(HEADER_RULER);
        out.push('\n');
    }
}

fn push_field(out: &mut String, key: &str, value: &str) {
    out.push_str(&format!("    {key:<12}{value};\n"));
}

/// A ruler is a `//` comment line made of `*` characters (spaced or not),
/// optionally closed by another `//`.
pub fn is_ruler(line: &str) -> bool {
    let Some(rest) = line.trim().strip_prefix("//") else {
        return false;
    };
    let rest = rest.trim_end();
    let rest = rest.strip_suffix("//").unwrap_or(rest);
    rest.contains('*') && rest.chars().all(|c| c == '*' || c.is_whitespace())
}

/// Byte offset just past the first ruler line, and the 1-based number of the
/// line that follows it.
pub(crate) fn find_ruler(text: &str) -> Option<(usize, usize)> {
    let mut offset = 0;
    for (idx, line) in text.split_inclusive('\n').enumerate() {
        offset += line.len();
        if is_ruler(line) {
            return Some((offset, idx + 2));
        }
    }
    None
}
