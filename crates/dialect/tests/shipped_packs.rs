//! Tests against the pack directory shipped at the workspace root.

use std::path::PathBuf;

use dialect::engine::{DEFAULT_BASE_PACK, lint_repository_with_base};
use dialect::{Engine, PackRepository, TransformOptions};

fn shipped_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../dialects")
}

fn engine() -> Engine {
    Engine::new(PackRepository::load_dir(shipped_dir()).unwrap())
}

#[test]
fn shipped_packs_load_validate_and_compile() {
    let engine = engine();
    assert_eq!(engine.repository().validate(), Ok(()));
    for id in engine.repository().ids() {
        engine.compiled(id).unwrap();
    }
    assert!(lint_repository_with_base(engine.repository(), DEFAULT_BASE_PACK).is_empty());
}

#[test]
fn west_vlaams_applies_its_whole_chain() {
    let engine = engine();
    let options = TransformOptions::builder()
        .particles(false)
        .bindings([("pronoun_subject".to_string(), "gij".to_string())].into())
        .build();

    let result = engine
        .transform_with(
            "vlaams/west-vlaams",
            "Jij moet snel komen. Wat is goed?",
            &options,
        )
        .unwrap();
    assert_eq!(result.output, "Gij moet rap komen. Wa is goe?");

    let chain = engine.compiled("vlaams/west-vlaams").unwrap();
    assert_eq!(chain.chain(), ["nl/standard", "vlaams/basis", "vlaams/west-vlaams"]);
}

#[test]
fn protected_terms_survive_every_shipped_pack() {
    let engine = engine();
    let text = "Dat is verboden, tenzij jij het niet kan. Wat mag wel?";
    for id in engine.repository().ids() {
        let output = engine.transform(id, text, Some(9)).unwrap().output;
        for term in ["verboden", "tenzij", "niet", "kan", "mag"] {
            assert!(output.contains(term), "{id} dropped '{term}': {output}");
        }
    }
}
