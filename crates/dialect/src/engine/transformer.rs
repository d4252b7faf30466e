//! Application of a compiled ruleset to text.

use std::collections::BTreeMap;
use std::ops::Range;

use bon::Builder;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use regex_lite::Regex;
use serde::Serialize;
use tracing::trace;

use crate::engine::casing::{CaseShape, capitalize_first, starts_uppercase};
use crate::engine::compiler::{CompiledRuleset, RuleAction};
use crate::engine::placeholders::fill_placeholders;
use crate::engine::sentence::{question_clauses, sentence_boundaries};
use crate::engine::terms::TermMatcher;

/// Seed used for particle draws when the caller does not supply one.
pub const DEFAULT_SEED: u64 = 0x00d1_a1ec_7000_5eed;

/// Options for a single transform call.
///
/// # Example
///
/// ```
/// use dialect::TransformOptions;
///
/// let options = TransformOptions::builder().seed(7).particles(false).build();
/// assert_eq!(options.seed, Some(7));
/// assert!(!options.particles);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct TransformOptions {
    /// Seed for particle draws. `None` uses [`DEFAULT_SEED`].
    pub seed: Option<u64>,

    /// Whether `append_particle` rules run at all.
    #[builder(default = true)]
    pub particles: bool,

    /// Values for `{name}` placeholders in replacement text.
    #[builder(default)]
    pub bindings: BTreeMap<String, String>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        TransformOptions::builder().build()
    }
}

/// The result of transforming one text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transformation {
    pub output: String,
    /// Every edit made, in the order it was made.
    pub applied: Vec<AppliedRule>,
}

/// A record of one edit, for auditing and tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedRule {
    /// Index of the rule in the effective rule list.
    pub rule_index: usize,
    /// Pack that declared the rule.
    pub pack_id: String,
    /// Byte range of `after` in the text as it stood right after this rule ran.
    pub span: Range<usize>,
    pub before: String,
    pub after: String,
}

/// Transform `input` with `compiled`, drawing particles from `seed`.
///
/// Never fails: every error is caught when the ruleset is compiled.
pub fn transform(input: &str, compiled: &CompiledRuleset, seed: Option<u64>) -> Transformation {
    let options = TransformOptions::builder().maybe_seed(seed).build();
    transform_with(input, compiled, &options)
}

/// Transform `input` with `compiled` under explicit options.
///
/// Protected terms are masked once, up front; rules then run in ruleset order,
/// each one rewriting the previous rule's output. No rule edits or matches
/// across a masked span.
pub fn transform_with(
    input: &str,
    compiled: &CompiledRuleset,
    options: &TransformOptions,
) -> Transformation {
    let mut rng = ChaCha8Rng::seed_from_u64(options.seed.unwrap_or(DEFAULT_SEED));
    let mut text = MaskedText::new(input, compiled.protected_terms());
    let mut applied = Vec::new();

    for rule in compiled.rules() {
        let edits = match &rule.action {
            RuleAction::ReplaceWord {
                matcher,
                to,
                only_in_questions,
            } => {
                let to = fill_placeholders(to, &options.bindings);
                word_edits(&text, matcher, &to, *only_in_questions)
            }
            RuleAction::ReplaceRegex {
                regex,
                to,
                preserve_case,
                ..
            } => {
                let to = fill_placeholders(to, &options.bindings);
                regex_matches(&text, regex)
                    .into_iter()
                    .map(|range| {
                        let matched = &text.text[range.clone()];
                        let replacement = if *preserve_case {
                            CaseShape::of(matched).apply(&to)
                        } else {
                            to.clone()
                        };
                        Edit::new(range, matched, replacement)
                    })
                    .collect()
            }
            RuleAction::AppendParticle {
                particle,
                probability,
            } => {
                if !options.particles {
                    continue;
                }
                let insertion = format!(" {particle}");
                sentence_boundaries(&text.text)
                    .into_iter()
                    .filter(|boundary| !text.covers(boundary.terminator))
                    .filter(|_| rng.gen_range(0.0..1.0) < *probability)
                    .map(|boundary| {
                        let at = boundary.terminator;
                        Edit::new(at..at, "", insertion.clone())
                    })
                    .collect()
            }
        };

        let edits: Vec<Edit> = edits
            .into_iter()
            .filter(|edit| edit.before != edit.replacement)
            .collect();
        for (edit, span) in edits.iter().zip(text.apply(&edits)) {
            trace!(
                rule = rule.index,
                pack = %rule.pack_id,
                before = %edit.before,
                after = %edit.replacement,
                "applied rule"
            );
            applied.push(AppliedRule {
                rule_index: rule.index,
                pack_id: rule.pack_id.clone(),
                span,
                before: edit.before.clone(),
                after: edit.replacement.clone(),
            });
        }
    }

    Transformation {
        output: text.text,
        applied,
    }
}

fn word_edits(
    text: &MaskedText,
    matcher: &TermMatcher,
    to: &str,
    only_in_questions: bool,
) -> Vec<Edit> {
    let questions = if only_in_questions {
        Some(question_clauses(&text.text))
    } else {
        None
    };
    matcher
        .find_iter(&text.text)
        .into_iter()
        .filter(|range| !text.is_masked(range))
        .filter(|range| {
            questions.as_ref().is_none_or(|clauses| {
                clauses
                    .iter()
                    .any(|clause| clause.start <= range.start && range.end <= clause.end)
            })
        })
        .map(|range| {
            let before = &text.text[range.clone()];
            let replacement = if starts_uppercase(before) {
                capitalize_first(to)
            } else {
                to.to_string()
            };
            Edit::new(range, before, replacement)
        })
        .collect()
}

/// Non-empty, non-overlapping matches of `regex` that avoid every mask.
///
/// A match touching a mask is discarded and the search resumes right after
/// it (or after the mask, when the match starts inside one), so text beyond a
/// rejected match is still searched.
fn regex_matches(text: &MaskedText, regex: &Regex) -> Vec<Range<usize>> {
    let haystack = text.text.as_str();
    let mut found = Vec::new();
    let mut at = 0;
    while at <= haystack.len() {
        let Some(m) = regex.find_at(haystack, at) else {
            break;
        };
        let range = m.start()..m.end();
        if let Some(mask) = text.mask_overlapping(&range) {
            at = if range.start >= mask.start {
                mask.end
            } else {
                next_char(haystack, range.start)
            };
        } else if range.is_empty() {
            at = next_char(haystack, range.end);
        } else {
            at = range.end;
            found.push(range);
        }
    }
    found
}

/// Byte offset of the character after the one at `offset`, or past the end.
fn next_char(text: &str, offset: usize) -> usize {
    text[offset..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| offset + c.len_utf8())
}

/// One pending replacement of `range` (possibly empty) with `replacement`.
struct Edit {
    range: Range<usize>,
    before: String,
    replacement: String,
}

impl Edit {
    fn new(range: Range<usize>, before: &str, replacement: String) -> Self {
        Self {
            range,
            before: before.to_string(),
            replacement,
        }
    }
}

/// The working text of one transform call, with its immutable masked spans.
struct MaskedText {
    text: String,
    /// Protected spans, sorted and non-overlapping.
    masks: Vec<Range<usize>>,
}

impl MaskedText {
    fn new(input: &str, protected: &TermMatcher) -> Self {
        Self {
            text: input.to_string(),
            masks: protected.find_iter(input),
        }
    }

    /// True if `range` overlaps a masked span. An empty range counts as
    /// overlapping only when it falls strictly inside one.
    fn is_masked(&self, range: &Range<usize>) -> bool {
        self.mask_overlapping(range).is_some()
    }

    /// The first masked span overlapping `range`, under the same rule as
    /// [`MaskedText::is_masked`].
    fn mask_overlapping(&self, range: &Range<usize>) -> Option<&Range<usize>> {
        self.masks
            .iter()
            .find(|mask| range.start < mask.end && mask.start < range.end)
    }

    /// True if the byte at `offset` lies inside a masked span.
    fn covers(&self, offset: usize) -> bool {
        self.masks.iter().any(|mask| mask.contains(&offset))
    }

    /// Apply non-overlapping edits and shift masks accordingly.
    ///
    /// Returns the range each edit's replacement occupies in the new text.
    fn apply(&mut self, edits: &[Edit]) -> Vec<Range<usize>> {
        if edits.is_empty() {
            return Vec::new();
        }
        let mut out = String::with_capacity(self.text.len());
        let mut spans = Vec::with_capacity(edits.len());
        let mut cursor = 0;
        for edit in edits {
            out.push_str(&self.text[cursor..edit.range.start]);
            let start = out.len();
            out.push_str(&edit.replacement);
            spans.push(start..out.len());
            cursor = edit.range.end;
        }
        out.push_str(&self.text[cursor..]);

        for mask in &mut self.masks {
            let (added, removed) = edits
                .iter()
                .filter(|edit| edit.range.end <= mask.start)
                .fold((0, 0), |(added, removed), edit| {
                    (
                        added + edit.replacement.len(),
                        removed + edit.range.len(),
                    )
                });
            let len = mask.len();
            mask.start = mask.start + added - removed;
            mask.end = mask.start + len;
        }

        self.text = out;
        spans
    }
}
