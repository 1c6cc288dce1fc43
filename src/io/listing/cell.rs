use super::interval::unfold_integer_intervals;
use super::reader::{Card, Listing, Section, parse_number, tokenize};
use crate::io::{Format, error::Error};
use crate::model::cell::{CellRecord, Particle};

/// Builds a cell record from the merged tokens of one cell card.
///
/// `line` is only used to locate errors.
pub fn cell_from_tokens<S: AsRef<str>>(tokens: &[S], line: usize) -> Result<CellRecord, Error> {
    let tokens: Vec<&str> = tokens.iter().map(|t| t.as_ref()).collect();
    let field = |i: usize, what: &str| {
        tokens
            .get(i)
            .copied()
            .ok_or_else(|| Error::parse(Format::Listing, line, format!("cell card has no {what}")))
    };

    let id: u32 = parse_number(field(0, "id")?, line, "cell id")?;
    let material: u32 = parse_number(field(1, "material")?, line, "material number")?;
    let (density, rest) = if material == 0 {
        (0.0, 2)
    } else {
        (parse_number(field(2, "density")?, line, "cell density")?, 3)
    };

    let mut cell = CellRecord::new(id, material, density);
    let mut iter = tokens[rest.min(tokens.len())..].iter().copied();
    while let Some(token) = iter.next() {
        let lower = token.to_ascii_lowercase();
        let Some(designators) = lower.strip_prefix("imp:") else {
            continue;
        };
        let value_token = iter.next().ok_or_else(|| {
            Error::parse(Format::Listing, line, format!("'{token}' has no value"))
        })?;
        let value: f64 = parse_number(value_token, line, "importance")?;
        for designator in designators.split(',') {
            let particle = designator
                .chars()
                .next()
                .filter(|_| designator.chars().count() == 1)
                .and_then(Particle::from_designator);
            match particle {
                Some(p) => cell.importances.set(p, value),
                None => log::debug!(
                    "cell {id}: ignoring importance for untracked particle '{designator}'"
                ),
            }
        }
    }
    Ok(cell)
}

/// Parses a cell card given as its raw input lines (first line plus continuations).
pub fn parse_cell<S: AsRef<str>>(lines: &[S]) -> Result<CellRecord, Error> {
    let tokens: Vec<String> = lines.iter().flat_map(|l| tokenize(l.as_ref())).collect();
    cell_from_tokens(&tokens, 1)
}

pub fn parse_cell_card(card: &Card) -> Result<CellRecord, Error> {
    cell_from_tokens(&card.tokens, card.line)
}

/// First cell card of the cell block whose id equals `id`.
pub fn find_cell(listing: &Listing, id: u32) -> Result<CellRecord, Error> {
    let key = id.to_string();
    listing
        .section(Section::Cells)
        .find(|card| card.tokens.first() == Some(&key))
        .ok_or(Error::CellNotFound(id))
        .and_then(|card| parse_cell_card(&card))
}

/// Every parsable cell of the cell block, in listing order.
///
/// Cards that do not parse (for instance `LIKE n BUT` cells) are skipped with a warning.
pub fn all_cells(listing: &Listing) -> Vec<CellRecord> {
    listing
        .section(Section::Cells)
        .filter_map(|card| match parse_cell_card(&card) {
            Ok(cell) => Some(cell),
            Err(e) => {
                log::warn!("skipping cell card: {e}");
                None
            }
        })
        .collect()
}

/// Cells listed on the `HISTP` card, whose histories feed HTAPE3X.
///
/// A leading negative entry (the history-file size limit) is dropped. A
/// listing without `HISTP` yields an empty list and a warning.
pub fn histp_cells(listing: &Listing) -> Result<Vec<u32>, Error> {
    let Some(card) = listing.data_card("histp") else {
        log::warn!("HISTP card not found; no cells are written to the history file");
        return Ok(Vec::new());
    };
    let mut tokens = &card.tokens[1..];
    if tokens.first().is_some_and(|t| t.starts_with('-')) {
        tokens = &tokens[1..];
    }
    unfold_integer_intervals(tokens)?
        .iter()
        .map(|t| parse_number(t, card.line, "HISTP cell"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
1mcnpx    version 2.7.0
    1-       cells
    2-       12   3  -7.8   -1   imp:n=1 imp:p=0
    3-       13   0          1   imp:n,p=2
    4-       14   like 12 but  trcl=5
    5-       120  3  0.05   -1  2
    6-
    7-       1   so  10
    8-       12  so  20
    9-
";

    #[test]
    fn parses_cell_tokens() {
        let cell = cell_from_tokens(&["12", "3", "-7.8", "imp:n", "1", "imp:p", "0"], 1).unwrap();
        assert_eq!(cell.id, 12);
        assert_eq!(cell.material, 3);
        assert_eq!(cell.density, -7.8);
        assert_eq!(cell.importances.neutron, 1.0);
        assert_eq!(cell.importances.photon, 0.0);
        assert_eq!(cell.importances.electron, 1.0);
        assert_eq!(cell.importances.proton, 1.0);
        assert_eq!(cell.importances.heavy_ion, 1.0);
    }

    #[test]
    fn void_cell_has_no_density_field() {
        let cell = parse_cell(&["13 0 1 imp:n,p=2 imp:e=0"]).unwrap();
        assert!(cell.is_void());
        assert_eq!(cell.density, 0.0);
        assert_eq!(cell.importances.neutron, 2.0);
        assert_eq!(cell.importances.photon, 2.0);
        assert_eq!(cell.importances.electron, 0.0);
    }

    #[test]
    fn parse_cell_merges_lines() {
        let cell = parse_cell(&["7 2 0.1 -3", "     imp:h=4 $ proton importance"]).unwrap();
        assert_eq!(cell.importances.proton, 4.0);
        assert_eq!(cell.density, 0.1);
    }

    #[test]
    fn malformed_cells_report_their_line() {
        let err = cell_from_tokens(&["12", "x"], 42).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 42, .. }));
        let err = cell_from_tokens(&["12", "1"], 7).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 7, .. }));
    }

    #[test]
    fn find_cell_searches_only_the_cell_block() {
        let listing = Listing::from_text(LISTING);
        let cell = find_cell(&listing, 12).unwrap();
        assert_eq!(cell.density, -7.8);
        assert_eq!(find_cell(&listing, 120).unwrap().density, 0.05);
        // Surface 1 exists, cell 1 does not.
        assert!(matches!(find_cell(&listing, 1), Err(Error::CellNotFound(1))));
    }

    #[test]
    fn all_cells_skips_unparsable_cards() {
        let listing = Listing::from_text(LISTING);
        let ids: Vec<_> = all_cells(&listing).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![12, 13, 120]);
    }

    #[test]
    fn histp_cells_drop_limit_and_unfold() {
        let text = format!("{LISTING}   10-       histp  -100 10 2i 40  &\n   11-       55\n");
        let listing = Listing::from_text(&text);
        assert_eq!(histp_cells(&listing).unwrap(), vec![10, 20, 30, 40, 55]);
        assert!(histp_cells(&Listing::from_text(LISTING)).unwrap().is_empty());
    }
}
