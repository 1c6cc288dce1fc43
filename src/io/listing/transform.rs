use super::interval::unfold_intervals;
use super::reader::{Card, Listing, Section, parse_number};
use crate::io::{Format, error::Error};
use crate::model::transform::{Mat3, Transform, cross, normalized};

/// Looks up `TR<id>` (or `*TR<id>`) among the data cards.
///
/// A missing card is not an error: the identity transform is returned and a
/// warning is logged.
pub fn find_transform(listing: &Listing, id: u32) -> Result<Transform, Error> {
    let plain = format!("tr{id}");
    let degrees = format!("*tr{id}");
    let card = listing
        .section(Section::Data)
        .find(|c| c.name().is_some_and(|n| n == plain || n == degrees));

    match card {
        Some(card) => parse_transform(&card),
        None => {
            log::warn!("TR{id} card not found; using identity transform");
            Ok(Transform::identity())
        }
    }
}

/// Builds a transform from a TR card, card name included in the token count.
///
/// | tokens | meaning                                                |
/// |--------|--------------------------------------------------------|
/// | 4      | translation only                                       |
/// | 10     | origin and two axes, third axis from their cross product |
/// | 13     | origin and three axes, re-orthonormalized             |
/// | 14     | as 13, plus the origin-frame flag (`-1`: local frame)  |
///
/// The 7 and 9 token forms (one axis, Euler angles) are rejected.
pub fn parse_transform(card: &Card) -> Result<Transform, Error> {
    let line = card.line;
    let name = card
        .tokens
        .first()
        .ok_or_else(|| Error::parse(Format::Listing, line, "empty TR card"))?;
    let in_degrees = name.starts_with('*');
    let number = name.trim_start_matches('*').get(2..).unwrap_or_default();
    let id: u32 = parse_number(number, line, "transform number")?;

    let values = unfold_intervals(&card.tokens[1..])?;
    let numbers = values
        .iter()
        .map(|t| parse_number::<f64>(t, line, "transform entry"))
        .collect::<Result<Vec<_>, _>>()?;

    let count = numbers.len() + 1;
    let coordinate = |i: usize| numbers.get(i).copied().unwrap_or(0.0);
    let origin = [coordinate(0), coordinate(1), coordinate(2)];
    let cosines: Vec<f64> = numbers
        .iter()
        .skip(3)
        .take(9)
        .map(|&v| if in_degrees { v.to_radians().cos() } else { v })
        .collect();
    let row = |i: usize| [cosines[3 * i], cosines[3 * i + 1], cosines[3 * i + 2]];

    let transform = match count {
        4 => Transform::translation(origin),
        10 => {
            let x = normalized(row(0));
            let y = normalized(row(1));
            Transform::from_rows(origin, [x, y, cross(x, y)])
        }
        13 | 14 => {
            let rows: Mat3 = [normalized(row(0)), normalized(row(1)), normalized(row(2))];
            Transform::from_rows(origin, rows)
        }
        7 | 9 => return Err(Error::UnsupportedTransform { id, tokens: count }),
        _ => {
            return Err(Error::parse(
                Format::Listing,
                line,
                format!("TR{id} has {count} tokens; expected 4, 10, 13 or 14"),
            ));
        }
    };

    if count == 14 && numbers[12] == -1.0 {
        return Ok(transform.with_local_origin());
    }
    Ok(transform)
}
