/*
    This module decides membership with the CYK algorithm
*/

mod table;

use itertools::Itertools;

use crate::grammar::{Grammar, RhsKey};
use table::ParseTable;

// Splits a query into its terminal tokens. Inputs in the original format
// carried one trailing space; tolerate that, but nothing else is cleaned
// up. A token no rule produces just never matches, so there is no error
// case here.
fn tokenize(input: &str) -> Vec<&str> {
    let input = input.strip_suffix(' ').unwrap_or(input);
    if input.is_empty() {
        return Vec::new();
    }
    input.split(' ').collect()
}

// Fills cell (start, span - 1) for a span of at least two tokens from the
// already-filled shorter spans: every way of cutting the span in two,
// paired across the left and right cells
fn fill_cell(table: &mut ParseTable, grammar: &Grammar, start: usize, span: usize) {
    let mut derivers = std::collections::HashSet::new();

    for split in 0..span - 1 {
        let left = table.cell(start, split);
        let right = table.cell(start + split + 1, span - split - 2);

        for (&a, &b) in left.iter().cartesian_product(right.iter()) {
            derivers.extend(grammar.producers(&RhsKey::Pair(a, b)));
        }
    }

    *table.cell_mut(start, span - 1) = derivers;
}

pub fn recognize_tokens(grammar: &Grammar, tokens: &[&str]) -> bool {
    let n = tokens.len();
    // The empty string has no derivation under CNF; reject it outright
    if n == 0 {
        return false;
    }

    let mut table = ParseTable::new(n);

    for (start, token) in tokens.iter().enumerate() {
        *table.cell_mut(start, 0) = grammar
            .producers(&RhsKey::Terminal(token.to_string()))
            .collect();
    }

    // Spans must be filled in increasing length; each cell reads only
    // cells of strictly shorter spans
    for span in 2..=n {
        for start in 0..=n - span {
            fill_cell(&mut table, grammar, start, span);
        }
    }

    table.cell(0, n - 1).contains(&grammar.start_symbol)
}

// Indicates whether the grammar accepts or rejects the given query string
pub fn recognize(grammar: &Grammar, input: &str) -> bool {
    recognize_tokens(grammar, &tokenize(input))
}
