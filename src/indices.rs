use crate::error::CatalogError;
use std::collections::BTreeSet;

/// Widest single `start-end` range accepted.
pub const MAX_RANGE_SPAN: u32 = 10_000;

/// Parse a user-supplied index list such as `"24, 30-35"`.
///
/// Tokens are separated by commas and are either a single number or an
/// inclusive `start-end` range. A range whose start is past its end covers
/// nothing. Blank tokens are skipped. The result is ascending with no
/// duplicates.
pub fn parse_index_range(input: &str) -> Result<Vec<u32>, CatalogError> {
    let mut indices = BTreeSet::new();
    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        match token.split_once('-') {
            Some((start, end)) => {
                let start = parse_number(start, token)?;
                let end = parse_number(end, token)?;
                if end >= start && end - start >= MAX_RANGE_SPAN {
                    return Err(CatalogError::RangeTooWide {
                        token: token.to_string(),
                        limit: MAX_RANGE_SPAN,
                    });
                }
                indices.extend(start..=end);
            }
            None => {
                indices.insert(parse_number(token, token)?);
            }
        }
    }
    Ok(indices.into_iter().collect())
}

fn parse_number(raw: &str, token: &str) -> Result<u32, CatalogError> {
    raw.trim()
        .parse()
        .map_err(|_| CatalogError::InvalidIndexRange(token.to_string()))
}
