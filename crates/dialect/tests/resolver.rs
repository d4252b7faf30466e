//! Integration tests for inheritance resolution.

use dialect::{Pack, PackRepository, ResolveError, Rule};

fn pack(id: &str, inherits: &[&str], rules: Vec<Rule>) -> Pack {
    Pack::builder()
        .id(id)
        .label(id)
        .inherits(inherits.iter().map(ToString::to_string).collect())
        .rules(rules)
        .build()
}

fn rule_names(repository: &PackRepository, id: &str) -> Vec<String> {
    repository
        .resolve(id)
        .unwrap()
        .iter_rules()
        .map(|rule| match rule {
            Rule::ReplaceWord { from, .. } => from.clone(),
            other => other.kind().to_string(),
        })
        .collect()
}

// =========================================================================
// Ordering
// =========================================================================

#[test]
fn ancestor_rules_come_first() {
    let repository = PackRepository::from_packs([
        pack("a", &[], vec![Rule::replace_word("a1", "x"), Rule::replace_word("a2", "x")]),
        pack("b", &["a"], vec![Rule::replace_word("b1", "x")]),
        pack("c", &["b"], vec![Rule::replace_word("c1", "x")]),
    ])
    .unwrap();

    assert_eq!(rule_names(&repository, "c"), vec!["a1", "a2", "b1", "c1"]);
    assert_eq!(repository.resolve("c").unwrap().chain, vec!["a", "b", "c"]);
}

#[test]
fn parents_are_visited_in_declared_order() {
    let repository = PackRepository::from_packs([
        pack("left", &[], vec![Rule::replace_word("l", "x")]),
        pack("right", &[], vec![Rule::replace_word("r", "x")]),
        pack("child", &["right", "left"], vec![Rule::replace_word("c", "x")]),
    ])
    .unwrap();

    assert_eq!(rule_names(&repository, "child"), vec!["r", "l", "c"]);
}

#[test]
fn shared_ancestor_appears_once() {
    let repository = PackRepository::from_packs([
        pack("root", &[], vec![Rule::replace_word("root", "x")]),
        pack("left", &["root"], vec![]),
        pack("right", &["root"], vec![]),
        pack("child", &["left", "right"], vec![]),
    ])
    .unwrap();

    let ruleset = repository.resolve("child").unwrap();
    assert_eq!(ruleset.chain, vec!["root", "left", "right", "child"]);
    assert_eq!(ruleset.rules.len(), 1);
}

#[test]
fn sourced_rules_keep_provenance() {
    let repository = PackRepository::from_packs([
        pack("a", &[], vec![Rule::replace_word("a1", "x")]),
        pack("b", &["a"], vec![Rule::replace_word("b1", "x"), Rule::replace_word("b2", "x")]),
    ])
    .unwrap();

    let ruleset = repository.resolve("b").unwrap();
    let provenance: Vec<(&str, usize)> = ruleset
        .rules
        .iter()
        .map(|sourced| (sourced.pack_id.as_str(), sourced.index_in_pack))
        .collect();
    assert_eq!(provenance, vec![("a", 0), ("b", 0), ("b", 1)]);
}

// =========================================================================
// Protected terms
// =========================================================================

#[test]
fn protected_terms_are_unioned_and_lowercased() {
    let base = Pack::builder()
        .id("base")
        .label("Base")
        .protected_terms(vec!["Moet".to_string(), "boete".to_string()])
        .build();
    let child = Pack::builder()
        .id("child")
        .label("Child")
        .inherits(vec!["base".to_string()])
        .protected_terms(vec!["verboden".to_string(), "BOETE".to_string(), " ".to_string()])
        .build();
    let repository = PackRepository::from_packs([base, child]).unwrap();

    let ruleset = repository.resolve("child").unwrap();
    let terms: Vec<&str> = ruleset.protected_terms.iter().map(String::as_str).collect();
    assert_eq!(terms, vec!["boete", "moet", "verboden"]);
    assert!(ruleset.is_protected("MOET"));
}

#[test]
fn resolution_is_idempotent() {
    let repository = PackRepository::from_packs([
        pack("a", &[], vec![Rule::replace_word("a1", "x")]),
        pack("b", &["a"], vec![Rule::append_particle("zeg", 0.5)]),
    ])
    .unwrap();

    assert_eq!(repository.resolve("b").unwrap(), repository.resolve("b").unwrap());
}

// =========================================================================
// Errors
// =========================================================================

#[test]
fn unknown_pack_suggests_close_ids() {
    let repository = PackRepository::from_packs([
        pack("vlaams/gent", &[], vec![]),
        pack("vlaams/genk", &[], vec![]),
        pack("vlaams/brugge", &[], vec![]),
    ])
    .unwrap();

    let err = repository.resolve("vlaams/gant").unwrap_err();
    let ResolveError::UnknownPack { id, suggestions } = &err else {
        panic!("expected UnknownPack, got {err:?}");
    };
    assert_eq!(id, "vlaams/gant");
    assert_eq!(suggestions, &vec!["vlaams/gent".to_string(), "vlaams/genk".to_string()]);
    assert!(err.to_string().contains("did you mean: vlaams/gent, vlaams/genk?"));
}

#[test]
fn unknown_pack_without_suggestions() {
    let repository = PackRepository::new();
    let err = repository.resolve("nl/standard").unwrap_err();
    assert_eq!(err.to_string(), "unknown pack 'nl/standard'");
}

#[test]
fn dangling_parent_is_reported() {
    let repository = PackRepository::from_packs([pack("child", &["ghost"], vec![])]).unwrap();

    assert_eq!(
        repository.resolve("child").unwrap_err(),
        ResolveError::UnknownParent {
            child: "child".to_string(),
            parent: "ghost".to_string(),
        }
    );
}

#[test]
fn two_pack_cycle_names_both_ids() {
    let repository =
        PackRepository::from_packs([pack("X", &["Y"], vec![]), pack("Y", &["X"], vec![])])
            .unwrap();

    let err = repository.resolve("X").unwrap_err();
    assert_eq!(
        err,
        ResolveError::CycleDetected {
            chain: vec!["X".to_string(), "Y".to_string(), "X".to_string()],
        }
    );
    assert_eq!(err.to_string(), "inheritance cycle detected: X -> Y -> X");
}

#[test]
fn self_inheritance_is_a_cycle() {
    let repository = PackRepository::from_packs([pack("loop", &["loop"], vec![])]).unwrap();
    assert!(matches!(
        repository.resolve("loop"),
        Err(ResolveError::CycleDetected { .. })
    ));
}

#[test]
fn validate_checks_every_pack() {
    let repository = PackRepository::from_packs([
        pack("fine", &[], vec![]),
        pack("broken", &["missing"], vec![]),
    ])
    .unwrap();
    assert!(matches!(
        repository.validate(),
        Err(ResolveError::UnknownParent { .. })
    ));

    let repository = PackRepository::from_packs([pack("fine", &[], vec![])]).unwrap();
    assert_eq!(repository.validate(), Ok(()));
}
