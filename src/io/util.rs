//! Fixed-format number rendering shared by the deck writers.
//!
//! The solver decks use C-style exponent notation (`1.234560e-01`, `1.000E+05`):
//! an explicit exponent sign and at least two exponent digits. Rust's `{:e}`
//! prints `1.23456e-1`, so the mantissa is formatted by `std` and the exponent
//! is rewritten here.

/// Lower-case exponent notation with `precision` mantissa decimals.
pub fn sci(value: f64, precision: usize) -> String {
    rewrite_exponent(format!("{value:.precision$e}"), 'e')
}

/// Upper-case exponent notation with `precision` mantissa decimals.
pub fn sci_upper(value: f64, precision: usize) -> String {
    rewrite_exponent(format!("{value:.precision$E}"), 'E')
}

fn rewrite_exponent(raw: String, marker: char) -> String {
    let Some((mantissa, exponent)) = raw.split_once(marker) else {
        // NaN and infinities carry no exponent.
        return raw;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}{marker}{sign}{digits:0>2}")
}

/// Joins `items` with `separator`, `per_line` items to a line, lines joined by `\n`.
///
/// No trailing newline is added.
pub fn chunked<S: AsRef<str>>(items: &[S], per_line: usize, separator: &str) -> String {
    items
        .chunks(per_line.max(1))
        .map(|chunk| {
            chunk
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(separator)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses a real number that may use a Fortran `D` exponent (`1.5D-03`).
pub fn parse_fortran_f64(token: &str) -> Option<f64> {
    token.replace(['D', 'd'], "E").parse().ok()
}
