//! Default dictionaries written by `CaseDirectory::create`.
//!
//! These values describe a steady incompressible `simpleFoam` run and are
//! reproduced literally so a freshly created case is accepted by OpenFOAM.

use foamdesk_dict::DictionaryDocument;

const CONTROL_DICT: &[(&str, &str)] = &[
    ("application", "simpleFoam"),
    ("startFrom", "startTime"),
    ("startTime", "0"),
    ("stopAt", "endTime"),
    ("endTime", "1000"),
    ("deltaT", "1"),
    ("writeControl", "timeStep"),
    ("writeInterval", "100"),
    ("purgeWrite", "0"),
    ("writeFormat", "ascii"),
    ("writePrecision", "6"),
    ("writeCompression", "off"),
    ("timeFormat", "general"),
    ("timePrecision", "6"),
    ("runTimeModifiable", "true"),
];

const FV_SCHEMES: &[(&str, &[(&str, &str)])] = &[
    ("ddtSchemes", &[("default", "steadyState")]),
    ("gradSchemes", &[("default", "Gauss linear")]),
    (
        "divSchemes",
        &[
            ("default", "none"),
            ("div(phi,U)", "bounded Gauss upwind"),
            ("div(phi,k)", "bounded Gauss upwind"),
            ("div(phi,epsilon)", "bounded Gauss upwind"),
            ("div(phi,omega)", "bounded Gauss upwind"),
            ("div((nuEff*dev2(T(grad(U)))))", "Gauss linear"),
        ],
    ),
    ("laplacianSchemes", &[("default", "Gauss linear corrected")]),
    ("interpolationSchemes", &[("default", "linear")]),
    ("snGradSchemes", &[("default", "corrected")]),
];

/// Scoped key/value pairs, in write order.
const FV_SOLUTION: &[(&str, &str)] = &[
    ("solvers/p/solver", "GAMG"),
    ("solvers/p/tolerance", "1e-6"),
    ("solvers/p/relTol", "0.1"),
    ("solvers/p/smoother", "GaussSeidel"),
    ("solvers/U/solver", "smoothSolver"),
    ("solvers/U/smoother", "GaussSeidel"),
    ("solvers/U/tolerance", "1e-6"),
    ("solvers/U/relTol", "0.1"),
    ("SIMPLE/nNonOrthogonalCorrectors", "0"),
    ("SIMPLE/consistent", "true"),
    ("SIMPLE/residualControl/p", "1e-4"),
    ("SIMPLE/residualControl/U", "1e-4"),
];

pub fn control_dict() -> DictionaryDocument {
    let mut doc = DictionaryDocument::new();
    for (key, value) in CONTROL_DICT {
        doc.insert(*key, *value);
    }
    doc.set_header_object("controlDict");
    doc
}

pub fn fv_schemes() -> DictionaryDocument {
    let mut doc = DictionaryDocument::new();
    for (block, entries) in FV_SCHEMES {
        let sub = doc.subdict_or_insert(block);
        for (key, value) in *entries {
            sub.insert(*key, *value);
        }
    }
    doc.set_header_object("fvSchemes");
    doc
}

pub fn fv_solution() -> DictionaryDocument {
    let mut doc = DictionaryDocument::new();
    for (path, value) in FV_SOLUTION {
        doc.set_path(path, *value);
    }
    doc.set_header_object("fvSolution");
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_dict_values() {
        let doc = control_dict();
        assert_eq!(doc.len(), 15);
        assert_eq!(doc.scalar("application"), Some("simpleFoam"));
        assert_eq!(doc.scalar("endTime"), Some("1000"));
        assert_eq!(doc.get_bool("runTimeModifiable"), Some(true));
        assert_eq!(doc.keys().last(), Some("runTimeModifiable"));
    }

    #[test]
    fn fv_schemes_blocks() {
        let doc = fv_schemes();
        assert_eq!(
            doc.keys().collect::<Vec<_>>(),
            [
                "ddtSchemes",
                "gradSchemes",
                "divSchemes",
                "laplacianSchemes",
                "interpolationSchemes",
                "snGradSchemes"
            ]
        );
        let div = doc.subdict("divSchemes").unwrap();
        assert_eq!(div.len(), 6);
        assert_eq!(
            div.scalar("div((nuEff*dev2(T(grad(U)))))"),
            Some("Gauss linear")
        );
    }

    #[test]
    fn fv_solution_layout() {
        let doc = fv_solution();
        assert_eq!(doc.keys().collect::<Vec<_>>(), ["solvers", "SIMPLE"]);
        let p = doc.lookup("solvers/p").and_then(|e| e.as_dict()).unwrap();
        assert_eq!(
            p.keys().collect::<Vec<_>>(),
            ["solver", "tolerance", "relTol", "smoother"]
        );
        assert_eq!(doc.lookup("SIMPLE/residualControl/U").and_then(|e| e.as_float()), Some(1e-4));
    }

    #[test]
    fn defaults_survive_round_trip() {
        for doc in [control_dict(), fv_schemes(), fv_solution()] {
            let back = DictionaryDocument::parse(&doc.serialize()).unwrap();
            assert_eq!(back, doc);
        }
    }
}
