/*
    This module stores validated CNF grammars
*/

use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use crate::error_handling::*;

// Nonterminals are single ASCII uppercase characters; anything else in a
// right-hand side is terminal text
pub type Nonterminal = char;

pub fn is_nonterminal(c: char) -> bool {
    c.is_ascii_uppercase()
}

// The right-hand side of a CNF production, used as the lookup key.
// Keeping the two shapes as separate variants means a two-letter terminal
// can never collide with a nonterminal pair.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum RhsKey {
    Terminal(String),
    Pair(Nonterminal, Nonterminal),
}

// A rule as the loader hands it over, before CNF validation
#[derive(Debug, PartialEq)]
pub struct RawRule {
    pub lhs: char,
    pub rhs: String,
    pub location: Location
}

#[derive(Debug, PartialEq)]
pub enum GrammarErrorType {
    // The left-hand side is not an uppercase nonterminal
    LhsNotNonterminal(char),
    // A rule with nothing after the arrow
    EmptyRhs,
    // A unit production, which CNF forbids
    SoloNonterminal(char),
    // A right-hand side that mentions nonterminals but is not exactly a pair
    MixedRhs(String),
    // The requested start symbol never appears on a left-hand side
    UnknownStart(char),
}

impl ErrorType for GrammarErrorType {}

impl Display for GrammarErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarErrorType::LhsNotNonterminal(c) => write!(f, "Left-hand side `{}` is not an uppercase nonterminal", c),
            GrammarErrorType::EmptyRhs => write!(f, "Right-hand side is empty; CNF needs one terminal or two nonterminals"),
            GrammarErrorType::SoloNonterminal(c) => write!(f, "Right-hand side is the single nonterminal `{}`; CNF forbids unit productions", c),
            GrammarErrorType::MixedRhs(rhs) => write!(f, "Right-hand side `{}` is neither one terminal nor exactly two nonterminals", rhs),
            GrammarErrorType::UnknownStart(c) => write!(f, "Start symbol `{}` has no rule", c),
        }
    }
}

pub type GrammarError = Error<GrammarErrorType>;
pub type GrammarErrors = Errors<GrammarErrorType>;

#[derive(Debug, PartialEq)]
pub struct Grammar {
    pub start_symbol: Nonterminal,
    rules: HashMap<RhsKey, HashSet<Nonterminal>>,
}

// Sorts a raw right-hand side into its CNF shape
fn classify_rhs(rhs: &str) -> Result<RhsKey, GrammarErrorType> {
    let mut chars = rhs.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (None, _, _) => Err(GrammarErrorType::EmptyRhs),
        (Some(a), Some(b), None) if is_nonterminal(a) && is_nonterminal(b) =>
            Ok(RhsKey::Pair(a, b)),
        (Some(a), None, _) if is_nonterminal(a) =>
            Err(GrammarErrorType::SoloNonterminal(a)),
        _ if rhs.chars().any(is_nonterminal) =>
            Err(GrammarErrorType::MixedRhs(rhs.to_string())),
        _ => Ok(RhsKey::Terminal(rhs.to_string()))
    }
}

impl Grammar {
    // Groups the rules by right-hand side and freezes them. Every violation
    // is reported; nothing partial is returned on failure.
    pub fn build(raw_rules: Vec<RawRule>, start: Nonterminal) -> Result<Grammar, GrammarErrors> {
        let mut rules = HashMap::<RhsKey, HashSet<Nonterminal>>::with_capacity(raw_rules.len());
        let mut defined = HashSet::new();
        let mut errors = GrammarErrors::new();

        // Whole-file errors point at the source file without a line
        let file_location = Location {
            file: raw_rules.first().map(|r| r.location.file.clone()).unwrap_or_default(),
            line: 0,
            column: 0
        };

        for rule in raw_rules {
            if !is_nonterminal(rule.lhs) {
                errors.push(GrammarError {
                    location: rule.location,
                    error: GrammarErrorType::LhsNotNonterminal(rule.lhs)
                });
                continue;
            }

            match classify_rhs(&rule.rhs) {
                Ok(key) => {
                    rules.entry(key).or_default().insert(rule.lhs);
                    defined.insert(rule.lhs);
                }
                Err(error) => errors.push(GrammarError {
                    location: rule.location,
                    error
                })
            }
        }

        if errors.is_empty() && !defined.contains(&start) {
            errors.push(GrammarError {
                location: file_location,
                error: GrammarErrorType::UnknownStart(start)
            });
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Grammar {
            start_symbol: start,
            rules
        })
    }

    // The nonterminals that directly produce the given right-hand side;
    // empty when no rule matches
    pub fn producers<'a>(&'a self, key: &RhsKey) -> impl Iterator<Item = Nonterminal> + 'a {
        self.rules.get(key).into_iter().flatten().copied()
    }
}
