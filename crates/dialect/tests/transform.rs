//! Integration tests for text transformation.

use std::collections::BTreeMap;

use dialect::{
    AppliedRule, CompiledRuleset, Pack, PackRepository, RegexFlag, Rule, TransformOptions,
    compile, transform, transform_with,
};

fn compiled(protected: &[&str], rules: Vec<Rule>) -> CompiledRuleset {
    let repository = PackRepository::from_packs([Pack::builder()
        .id("test/pack")
        .label("Test")
        .protected_terms(protected.iter().map(ToString::to_string).collect())
        .rules(rules)
        .build()])
    .unwrap();
    compile(&repository.resolve("test/pack").unwrap()).unwrap()
}

fn run(protected: &[&str], rules: Vec<Rule>, input: &str) -> String {
    transform(input, &compiled(protected, rules), Some(7)).output
}

fn dat_is_rule() -> Rule {
    Rule::ReplaceRegex {
        pattern: r"\bdat is\b".to_string(),
        to: "da's".to_string(),
        flags: vec![RegexFlag::IgnoreCase],
        preserve_case: true,
    }
}

// =========================================================================
// replace_word
// =========================================================================

#[test]
fn replace_word_preserves_capitalization() {
    insta::assert_snapshot!(
        run(&[], vec![Rule::replace_word("jij", "gij")], "Jij komt?"),
        @"Gij komt?"
    );
}

#[test]
fn replace_word_keeps_declared_case_for_lowercase_matches() {
    assert_eq!(
        run(&[], vec![Rule::replace_word("jij", "gij")], "Kom jij ook? JIJ!"),
        "Kom gij ook? Gij!"
    );
}

#[test]
fn replace_word_matches_whole_words_only() {
    assert_eq!(
        run(&[], vec![Rule::replace_word("even", "efkes")], "Wacht even, evenwel."),
        "Wacht efkes, evenwel."
    );
}

#[test]
fn replace_word_only_in_questions() {
    assert_eq!(
        run(
            &[],
            vec![Rule::replace_word_in_questions("wat", "wa")],
            "Wat doe je? Wat een dag."
        ),
        "Wa doe je? Wat een dag."
    );
}

#[test]
fn question_scope_covers_every_question_clause() {
    assert_eq!(
        run(
            &[],
            vec![Rule::replace_word_in_questions("wat", "wa")],
            "Wat? Ik weet wat. En wat nu?!"
        ),
        "Wa? Ik weet wat. En wa nu?!"
    );
}

#[test]
fn unterminated_clause_is_not_a_question() {
    assert_eq!(
        run(&[], vec![Rule::replace_word_in_questions("wat", "wa")], "Wat nu"),
        "Wat nu"
    );
}

// =========================================================================
// replace_regex
// =========================================================================

#[test]
fn replace_regex_preserves_case_shapes() {
    assert_eq!(
        run(&[], vec![dat_is_rule()], "Dat is goed. dat is goed. DAT IS GOED."),
        "Da's goed. da's goed. DA'S GOED."
    );
}

#[test]
fn replace_regex_without_preserve_case_is_verbatim() {
    let rule = Rule::ReplaceRegex {
        pattern: r"\bdat is\b".to_string(),
        to: "da's".to_string(),
        flags: vec![RegexFlag::IgnoreCase],
        preserve_case: false,
    };
    assert_eq!(run(&[], vec![rule], "Dat is goed."), "da's goed.");
}

#[test]
fn multiline_flag_anchors_per_line() {
    let rule = Rule::ReplaceRegex {
        pattern: "^ja".to_string(),
        to: "jaja".to_string(),
        flags: vec![RegexFlag::Multiline],
        preserve_case: false,
    };
    assert_eq!(run(&[], vec![rule], "ja\nja"), "jaja\njaja");

    let rule = Rule::replace_regex("^ja", "jaja");
    assert_eq!(run(&[], vec![rule], "ja\nja"), "jaja\nja");
}

// =========================================================================
// Protected terms
// =========================================================================

#[test]
fn protected_terms_block_regex_rules() {
    assert_eq!(
        run(&["moet"], vec![Rule::replace_regex("moet", "moe")], "Dat moet gebeuren."),
        "Dat moet gebeuren."
    );
}

#[test]
fn protected_terms_block_partial_overlap() {
    assert_eq!(
        run(&["moet"], vec![Rule::replace_regex("et ge", "X")], "Dat moet gebeuren."),
        "Dat moet gebeuren."
    );
    assert_eq!(
        run(&["moet"], vec![Rule::replace_regex("n ge", "X")], "Zij moet gaan geven."),
        "Zij moet gaaXven."
    );
}

#[test]
fn regex_search_resumes_after_a_masked_match() {
    let rule = Rule::replace_regex(r"\b(niet )?goed\b", "goe");
    assert_eq!(
        run(&["niet"], vec![rule.clone()], "Dat is niet goed."),
        "Dat is niet goe."
    );
    assert_eq!(run(&["niet"], vec![rule], "Dat is goed."), "Dat is goe.");
    assert_eq!(
        run(&["moet"], vec![Rule::replace_regex("t g|g", "k")], "Zij moet gaan."),
        "Zij moet kaan."
    );
}

#[test]
fn protected_terms_block_word_rules_case_insensitively() {
    assert_eq!(
        run(&["Niet"], vec![Rule::replace_word("niet", "ni")], "NIET doen, niet!"),
        "NIET doen, niet!"
    );
}

#[test]
fn masks_survive_earlier_rewrites() {
    let rules = vec![
        Rule::replace_word("jij", "gijzelf"),
        Rule::replace_regex("moet", "moe"),
    ];
    assert_eq!(run(&["moet"], rules, "Jij moet, jij."), "Gijzelf moet, gijzelf.");
}

#[test]
fn multi_word_protected_terms_are_masked() {
    assert_eq!(
        run(&["dat is"], vec![dat_is_rule()], "Dat is verboden."),
        "Dat is verboden."
    );
}

// =========================================================================
// append_particle
// =========================================================================

#[test]
fn certain_particle_is_always_appended() {
    for seed in [0, 1, 42, u64::MAX] {
        let result = transform(
            "Dat is goed.",
            &compiled(&[], vec![Rule::append_particle("zeg", 1.0)]),
            Some(seed),
        );
        assert_eq!(result.output, "Dat is goed zeg.");
    }
}

#[test]
fn impossible_particle_is_never_appended() {
    assert_eq!(
        run(&[], vec![Rule::append_particle("zeg", 0.0)], "Dat is goed."),
        "Dat is goed."
    );
}

#[test]
fn particles_go_before_each_terminator_run() {
    assert_eq!(
        run(&[], vec![Rule::append_particle("zeg", 1.0)], "Echt?! Ja... 3.5 euro"),
        "Echt zeg?! Ja zeg... 3.5 euro"
    );
}

#[test]
fn several_particles_can_land_on_one_sentence() {
    let rules = vec![
        Rule::append_particle("zeg", 1.0),
        Rule::append_particle("allee", 1.0),
    ];
    assert_eq!(run(&[], rules, "Goed."), "Goed zeg allee.");
}

#[test]
fn particles_can_be_disabled() {
    let options = TransformOptions::builder().seed(1).particles(false).build();
    let result = transform_with(
        "Dat is goed.",
        &compiled(&[], vec![Rule::append_particle("zeg", 1.0)]),
        &options,
    );
    assert_eq!(result.output, "Dat is goed.");
    assert!(result.applied.is_empty());
}

#[test]
fn particle_draws_depend_on_seed() {
    let compiled = compiled(&[], vec![Rule::append_particle("zeg", 0.5)]);
    let text = "Ja. ".repeat(64);
    let outputs: Vec<String> = (0..8)
        .map(|seed| transform(&text, &compiled, Some(seed)).output)
        .collect();
    assert!(outputs.iter().any(|output| output != &outputs[0]));
    assert!(outputs.iter().all(|output| output.contains("zeg")));
}

#[test]
fn missing_seed_uses_default_seed() {
    let compiled = compiled(&[], vec![Rule::append_particle("zeg", 0.5)]);
    let text = "Ja. ".repeat(32);
    assert_eq!(
        transform(&text, &compiled, None),
        transform(&text, &compiled, Some(dialect::engine::DEFAULT_SEED))
    );
}

// =========================================================================
// Composition and records
// =========================================================================

#[test]
fn rules_compose_sequentially() {
    let rules = vec![
        Rule::replace_word("snel", "rap"),
        Rule::replace_word("rap", "rapper"),
    ];
    assert_eq!(run(&[], rules, "Kom snel."), "Kom rapper.");
}

#[test]
fn placeholders_are_filled_from_bindings() {
    let compiled = compiled(
        &[],
        vec![
            Rule::replace_word("jij", "{pronoun_subject}"),
            Rule::replace_word("jou", "{pronoun_object}"),
        ],
    );
    let options = TransformOptions::builder()
        .bindings(BTreeMap::from([(
            "pronoun_subject".to_string(),
            "ge".to_string(),
        )]))
        .build();
    let result = transform_with("Jij ziet jou.", &compiled, &options);
    assert_eq!(result.output, "Ge ziet {pronoun_object}.");
}

#[test]
fn applied_records_describe_each_edit() {
    let rules = vec![Rule::replace_word("jij", "gij"), Rule::append_particle("zeg", 1.0)];
    let result = transform("Jij komt.", &compiled(&[], rules), Some(3));

    assert_eq!(result.output, "Gij komt zeg.");
    assert_eq!(
        result.applied,
        vec![
            AppliedRule {
                rule_index: 0,
                pack_id: "test/pack".to_string(),
                span: 0..3,
                before: "Jij".to_string(),
                after: "Gij".to_string(),
            },
            AppliedRule {
                rule_index: 1,
                pack_id: "test/pack".to_string(),
                span: 8..12,
                before: String::new(),
                after: " zeg".to_string(),
            },
        ]
    );
}

#[test]
fn applied_log_renders_in_order() {
    let rules = vec![dat_is_rule(), Rule::replace_word("goed", "goe")];
    let result = transform("Dat is goed.", &compiled(&[], rules), Some(3));
    let log = result
        .applied
        .iter()
        .map(|a| format!("{} {:?} {:?} -> {:?}", a.rule_index, a.span, a.before, a.after))
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(log, @r#"
    0 0..4 "Dat is" -> "Da's"
    1 5..8 "goed" -> "goe"
    "#);
}

#[test]
fn empty_input_is_fine() {
    let rules = vec![Rule::replace_word("jij", "gij"), Rule::append_particle("zeg", 1.0)];
    assert_eq!(run(&["moet"], rules, ""), "");
}
