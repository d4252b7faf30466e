//! Lexical sentence and question-clause scanning.
//!
//! A sentence ends at a run of terminators (`.`, `!`, `?`). A `.` directly
//! followed by a letter or digit is not a terminator, so `3.14` and
//! `www.vlaanderen.be` stay inside their sentence. A clause needs at least one
//! letter or digit before its terminator to count; a lone `...` is not a
//! sentence.

use std::ops::Range;

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// No letter or digit seen since the last boundary.
    Outside,
    /// Inside a clause with content.
    InClause,
    /// Inside a terminator run that closes a clause.
    AfterTerminator,
}

/// The end of one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary {
    /// Byte offset where the clause starts (just after the previous boundary).
    pub clause_start: usize,
    /// Byte offset of the first terminator of the run. Particles go here.
    pub terminator: usize,
    /// Byte offset just past the terminator run.
    pub end: usize,
    /// True if the terminator run contains `?`.
    pub question: bool,
}

impl Boundary {
    /// The clause including its terminators.
    pub fn clause(&self) -> Range<usize> {
        self.clause_start..self.end
    }
}

/// Find every sentence boundary in `text`, in order.
pub fn sentence_boundaries(text: &str) -> Vec<Boundary> {
    let mut boundaries = Vec::new();
    let mut state = ScanState::Outside;
    let mut clause_start = 0;
    let mut run_start = 0;
    let mut question = false;

    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        if is_terminator(c, next) {
            match state {
                ScanState::Outside => {}
                ScanState::InClause => {
                    state = ScanState::AfterTerminator;
                    run_start = i;
                    question = c == '?';
                }
                ScanState::AfterTerminator => question |= c == '?',
            }
            continue;
        }

        if state == ScanState::AfterTerminator {
            boundaries.push(Boundary {
                clause_start,
                terminator: run_start,
                end: i,
                question,
            });
            clause_start = i;
            state = ScanState::Outside;
        }
        if c.is_alphanumeric() {
            state = ScanState::InClause;
        }
    }

    if state == ScanState::AfterTerminator {
        boundaries.push(Boundary {
            clause_start,
            terminator: run_start,
            end: text.len(),
            question,
        });
    }
    boundaries
}

/// Byte ranges of clauses that end in a question mark.
pub fn question_clauses(text: &str) -> Vec<Range<usize>> {
    sentence_boundaries(text)
        .into_iter()
        .filter(|boundary| boundary.question)
        .map(|boundary| boundary.clause())
        .collect()
}

fn is_terminator(c: char, next: Option<char>) -> bool {
    match c {
        '!' | '?' => true,
        '.' => !next.is_some_and(char::is_alphanumeric),
        _ => false,
    }
}
