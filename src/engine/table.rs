use std::collections::HashSet;

use crate::grammar::Nonterminal;

// The triangular CYK table for one query. Row r holds the cells for spans
// of r + 1 tokens, so row r has n - r cells and cell (start, r) covers
// tokens[start..start + r + 1]. Rows shrink as spans grow.
pub struct ParseTable {
    rows: Vec<Vec<HashSet<Nonterminal>>>,
}

impl ParseTable {
    pub fn new(token_count: usize) -> ParseTable {
        ParseTable {
            rows: (0..token_count)
                .map(|row| vec![HashSet::new(); token_count - row])
                .collect()
        }
    }

    pub fn cell(&self, start: usize, span_rows: usize) -> &HashSet<Nonterminal> {
        &self.rows[span_rows][start]
    }

    pub fn cell_mut(&mut self, start: usize, span_rows: usize) -> &mut HashSet<Nonterminal> {
        &mut self.rows[span_rows][start]
    }
}
