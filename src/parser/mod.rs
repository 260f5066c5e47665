/*
    This module loads CNF grammar files
*/

mod scan;

use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::PathBuf;

use crate::error_handling::*;
use crate::grammar::{Grammar, Nonterminal, RawRule};
use crate::grammar::GrammarErrorType;
use itertools::Itertools;

#[derive(Debug)]
pub enum LoadErrorType {
    // A rule line starts with `-` or nothing at all
    MissingNonterminal,
    // No space between the left-hand symbol and the arrow
    MissingSpaceBeforeArrow,
    // The `-` of the arrow is absent
    MissingDash,
    // The `>` of the arrow is absent
    MissingArrowhead,
    // No space between the arrow and the right-hand side
    MissingSpaceAfterArrow,
    // The file holds no rules at all
    EmptyGrammar,
    // A rule violates Chomsky Normal Form
    Cnf(GrammarErrorType),
    // There was an issue with reading the file
    FileError(std::io::Error),
}

impl ErrorType for LoadErrorType {}

impl PartialEq for LoadErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LoadErrorType::FileError(a), LoadErrorType::FileError(b)) => a.kind() == b.kind(),
            (LoadErrorType::Cnf(a), LoadErrorType::Cnf(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other)
        }
    }
}

impl Display for LoadErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadErrorType::MissingNonterminal => write!(f, "No nonterminal was found before `->`"),
            LoadErrorType::MissingSpaceBeforeArrow => write!(f, "Expected ` ` between the nonterminal and `->`"),
            LoadErrorType::MissingDash => write!(f, "Expected `-` after the nonterminal"),
            LoadErrorType::MissingArrowhead => write!(f, "Expected `>` after `-`"),
            LoadErrorType::MissingSpaceAfterArrow => write!(f, "Expected ` ` after `->`"),
            LoadErrorType::EmptyGrammar => write!(f, "The grammar file contains no rules"),
            LoadErrorType::Cnf(e) => write!(f, "{}", e),
            LoadErrorType::FileError(e) => write!(f, "File error: {}", e),
        }
    }
}

pub type LoadError = Error<LoadErrorType>;
pub type LoadErrors = Errors<LoadErrorType>;

pub type LineResult<T> = std::result::Result<T, LoadError>;
pub type FileResult<T> = std::result::Result<T, LoadErrors>;

fn io_error(error: std::io::Error, file: PathBuf) -> LoadError {
    LoadError {
        location: Location {
            file,
            line: 0,
            column: 0
        },
        error: LoadErrorType::FileError(error)
    }
}

fn parse_line(line: &str, location: Location) -> LineResult<RawRule> {
    match scan::scan_rule(line) {
        Ok((lhs, rhs)) => Ok(RawRule {
            lhs,
            rhs: rhs.to_string(),
            location
        }),
        Err((error, column)) => Err(LoadError {
            location: Location { column, ..location },
            error
        })
    }
}

// Blank lines and `;` comments carry no rules
fn is_rule_line(line: &String) -> bool {
    !line.trim_end().is_empty() && !line.starts_with(';')
}

// Returns an iterator over the rule lines of a file, with the io errors
// wrapped in LoadError and enumerated
fn rule_line_nums<'a>(file: File, path: &'a PathBuf) -> impl Iterator<Item = (usize, LineResult<String>)> + 'a {
    std::io::BufReader::new(file)
        .lines()
        .map(move |line| line.map_err(|e| io_error(e, path.clone())))
        .enumerate()
        .filter(|(_, line)| line.as_ref().is_ok_and(is_rule_line) || line.is_err())
        .map(|(num, line)| (num + 1, line))
}

fn grammar_from_rules(rules: Vec<RawRule>, start_override: Option<Nonterminal>, path: &PathBuf) -> FileResult<Grammar> {
    // The first rule's left-hand side is the conventional start symbol,
    // unless the caller picked one explicitly
    let start = match (start_override, rules.first()) {
        (Some(start), _) => start,
        (None, Some(rule)) => rule.lhs,
        (None, None) => return Err(vec![LoadError {
            location: Location { file: path.clone(), line: 0, column: 0 },
            error: LoadErrorType::EmptyGrammar
        }])
    };

    Grammar::build(rules, start).map_err(|errors| {
        errors.into_iter()
            .map(|e| LoadError {
                location: e.location,
                error: LoadErrorType::Cnf(e.error)
            })
            .collect_vec()
    })
}

pub fn parse_file(path: &PathBuf, start_override: Option<Nonterminal>) -> FileResult<Grammar> {
    let file = File::open(path).map_err(|e| vec![io_error(e, path.clone())])?;
    let lines = rule_line_nums(file, path);

    let parsed_lines = lines.map(|(num, line_res)| {
        line_res.and_then(|line| parse_line(line.trim_end(), Location {
            file: path.clone(),
            line: num,
            column: 0
        }))
    });

    let (rules, errors): (Vec<_>, Vec<_>) = parsed_lines.partition(LineResult::is_ok);
    if errors.len() > 0 {
        return Err(errors.into_iter().map(LineResult::unwrap_err).collect_vec());
    }
    let rules_unwrapped = rules.into_iter().map(LineResult::unwrap).collect_vec();

    return grammar_from_rules(rules_unwrapped, start_override, path);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::RhsKey;

    fn line_location(path: &PathBuf, line: usize, column: usize) -> Location {
        Location {
            file: path.clone(),
            line,
            column
        }
    }

    #[test]
    fn parse_normal_line() {
        let parsed = parse_line("S -> AB", Location::new()).unwrap();

        assert_eq!(parsed, RawRule {
            lhs: 'S',
            rhs: "AB".to_string(),
            location: Location::new()
        });
    }

    #[test]
    fn parse_malformed_line() {
        let result = parse_line("X>Y", Location::new());

        assert_eq!(result, Err(LoadError {
            location: Location { column: 2, ..Location::new() },
            error: LoadErrorType::MissingSpaceBeforeArrow
        }));
    }

    #[test]
    fn skip_comments_and_blanks() {
        assert!(is_rule_line(&"S -> AB".to_string()));
        assert!(!is_rule_line(&"".to_string()));
        assert!(!is_rule_line(&"   ".to_string()));
        assert!(!is_rule_line(&"; a^n b^n, n >= 1".to_string()));
    }

    #[test]
    fn parse_normal_file() {
        let example_path = PathBuf::from("example_data/simple.cnf");
        let grammar = parse_file(&example_path, None).unwrap();

        assert_eq!(grammar.start_symbol, 'S');
        assert_eq!(
            grammar.producers(&RhsKey::Pair('A', 'B')).collect::<Vec<_>>(),
            vec!['S']
        );
        assert_eq!(
            grammar.producers(&RhsKey::Terminal("a".to_string())).collect::<Vec<_>>(),
            vec!['A']
        );
        assert_eq!(
            grammar.producers(&RhsKey::Terminal("b".to_string())).collect::<Vec<_>>(),
            vec!['B']
        );
    }

    #[test]
    fn parse_file_with_start_override() {
        let example_path = PathBuf::from("example_data/simple.cnf");
        let grammar = parse_file(&example_path, Some('A')).unwrap();

        assert_eq!(grammar.start_symbol, 'A');
    }

    #[test]
    fn parse_malformed_file() {
        let example_path = PathBuf::from("example_data/malformed.cnf");
        let errors = parse_file(&example_path, None).unwrap_err();

        assert_eq!(errors, vec![
            LoadError {
                location: line_location(&example_path, 2, 2),
                error: LoadErrorType::MissingSpaceBeforeArrow
            },
            LoadError {
                location: line_location(&example_path, 4, 5),
                error: LoadErrorType::MissingSpaceAfterArrow
            }
        ]);
    }

    #[test]
    fn parse_non_cnf_file() {
        let example_path = PathBuf::from("example_data/not_cnf.cnf");
        let errors = parse_file(&example_path, None).unwrap_err();

        assert_eq!(errors, vec![
            LoadError {
                location: line_location(&example_path, 2, 0),
                error: LoadErrorType::Cnf(GrammarErrorType::SoloNonterminal('A'))
            },
            LoadError {
                location: line_location(&example_path, 3, 0),
                error: LoadErrorType::Cnf(GrammarErrorType::MixedRhs("ABC".to_string()))
            }
        ]);
    }

    #[test]
    fn parse_missing_file() {
        let missing_path = PathBuf::from("example_data/no_such_file.cnf");
        let errors = parse_file(&missing_path, None).unwrap_err();

        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0].error, LoadErrorType::FileError(_)));
    }

    #[test]
    fn parse_empty_file() {
        let example_path = PathBuf::from("example_data/comments_only.cnf");
        let errors = parse_file(&example_path, None).unwrap_err();

        assert_eq!(errors, vec![LoadError {
            location: line_location(&example_path, 0, 0),
            error: LoadErrorType::EmptyGrammar
        }]);
    }
}
