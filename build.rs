use std::path::Path;

fn main() {
    let seed_path = Path::new("data/demo_kb.json");
    validate_seed_file(seed_path);
    println!("cargo:rerun-if-changed={}", seed_path.display());
}

fn validate_seed_file(seed_path: &Path) {
    // Ensure the embedded demo seed exists at build time
    assert!(
        seed_path.exists(),
        "\n\nSEED BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the demo seed file before building.\n",
        seed_path.display()
    );

    let seed_contents = std::fs::read_to_string(seed_path).unwrap_or_else(|e| {
        panic!(
            "\n\nSEED BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            seed_path.display()
        );
    });

    // Parse and sanity-check the JSON shape; semantic validation happens at
    // import time in the library
    let seed: serde_json::Value = serde_json::from_str(&seed_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nSEED BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n",
            seed_path.display()
        );
    });

    for key in [
        "version",
        "body_systems",
        "symptoms",
        "diseases",
        "disease_symptoms",
        "risk_factors",
        "disease_risk_factors",
    ] {
        assert!(
            seed.get(key).is_some(),
            "\n\nSEED BUILD ERROR: Missing key {key:?} in {}\n",
            seed_path.display()
        );
    }
}
