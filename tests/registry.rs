use demucs_stems::{expected_stems, is_known_model, model::registry::parse_registry, registry, Stem};

const FOUR: [Stem; 4] = [Stem::Vocals, Stem::Bass, Stem::Drums, Stem::Other];

#[test]
fn embedded_registry_lists_the_eight_models() {
    let names: Vec<&str> = registry().names().collect();
    assert_eq!(
        names,
        [
            "htdemucs",
            "htdemucs_ft",
            "htdemucs_6s",
            "hdemucs_mmi",
            "mdx",
            "mdx_extra",
            "mdx_q",
            "mdx_extra_q"
        ]
    );
    assert_eq!(registry().default_model(), "mdx_extra_q");
}

#[test]
fn only_six_source_model_expects_piano_and_guitar() {
    assert_eq!(expected_stems("htdemucs_6s"), &Stem::ALL);

    for name in registry().names().filter(|n| *n != "htdemucs_6s") {
        assert_eq!(expected_stems(name), &FOUR, "model {name}");
    }
}

#[test]
fn unknown_model_falls_back_to_standard_stems() {
    assert!(!is_known_model("my_finetune"));
    assert_eq!(expected_stems("my_finetune"), &FOUR);
    assert_eq!(expected_stems(""), &FOUR);
}

#[test]
fn registry_with_missing_default_is_rejected() {
    let json = r#"{ "default": "ghost", "models": [
        { "name": "mdx", "description": "x", "stems": ["vocals"] }
    ] }"#;
    let err = parse_registry(json).unwrap_err();
    assert!(err.to_string().contains("ghost"), "got: {err}");
}

#[test]
fn registry_with_unknown_stem_is_rejected() {
    let json = r#"{ "default": "mdx", "models": [
        { "name": "mdx", "description": "x", "stems": ["kazoo"] }
    ] }"#;
    assert!(parse_registry(json).is_err());
}
