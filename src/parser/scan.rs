use super::LoadErrorType;

// A scan failure is the missing token plus the column it was expected at
pub type ScanResult<T> = Result<T, (LoadErrorType, usize)>;

// Splits a rule line `X -> rhs` into its left-hand symbol and right-hand
// text, checking each position of the arrow in turn so the first missing
// token is the one reported
pub fn scan_rule(line: &str) -> ScanResult<(char, &str)> {
    let mut chars = line.chars();

    let lhs = match chars.next() {
        Some(c) if c != '-' => c,
        _ => return Err((LoadErrorType::MissingNonterminal, 1))
    };

    let arrow = [
        (' ', LoadErrorType::MissingSpaceBeforeArrow),
        ('-', LoadErrorType::MissingDash),
        ('>', LoadErrorType::MissingArrowhead),
        (' ', LoadErrorType::MissingSpaceAfterArrow)
    ];
    for (column, (expected, error)) in arrow.into_iter().enumerate() {
        if chars.next() != Some(expected) {
            return Err((error, column + 2));
        }
    }

    Ok((lhs, chars.as_str()))
}
