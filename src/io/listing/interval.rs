use crate::io::error::Error;
use regex::Regex;
use std::sync::LazyLock;

static INTERVAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d*)[iI]$").expect("valid interval pattern"));

/// Largest count accepted in an `<n>i` token.
pub const MAX_INTERVAL_COUNT: usize = 100_000;

/// Number of values an `<n>i` token stands for; a bare `i` means one.
///
/// Returns `Ok(None)` for tokens that are not interval shorthand.
pub fn interval_count(token: &str) -> Result<Option<usize>, Error> {
    let Some(caps) = INTERVAL.captures(token) else {
        return Ok(None);
    };
    let count = match caps.get(1).map(|m| m.as_str()) {
        Some("") | None => 1,
        Some(n) => n.parse::<usize>().unwrap_or(usize::MAX),
    };
    if count > MAX_INTERVAL_COUNT {
        return Err(Error::InvalidInterval(format!(
            "'{token}' exceeds the limit of {MAX_INTERVAL_COUNT} values"
        )));
    }
    Ok(Some(count))
}

/// Expands every `<n>i` token into `n` values evenly spaced strictly between
/// its neighbours. Token lists without interval tokens are returned unchanged.
pub fn unfold_intervals<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<String>, Error> {
    unfold_with(tokens, |lo: f64, hi: f64, k, n| {
        (lo + (hi - lo) * k as f64 / (n + 1) as f64).to_string()
    })
}

/// Integer flavour of [`unfold_intervals`], for cell and index lists.
pub fn unfold_integer_intervals<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<String>, Error> {
    unfold_with(tokens, |lo: i64, hi: i64, k, n| {
        (lo + (hi - lo) * k as i64 / (n + 1) as i64).to_string()
    })
}

fn unfold_with<S, T, F>(tokens: &[S], interpolate: F) -> Result<Vec<String>, Error>
where
    S: AsRef<str>,
    T: std::str::FromStr + Copy,
    F: Fn(T, T, usize, usize) -> String,
{
    let mut out = Vec::with_capacity(tokens.len());
    for (i, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        let Some(n) = interval_count(token)? else {
            out.push(token.to_string());
            continue;
        };

        let neighbour = |j: Option<usize>| {
            j.and_then(|j| tokens.get(j))
                .and_then(|t| t.as_ref().parse::<T>().ok())
        };
        let (Some(lo), Some(hi)) = (neighbour(i.checked_sub(1)), neighbour(Some(i + 1))) else {
            return Err(Error::InvalidInterval(format!(
                "'{token}' must sit between two numbers"
            )));
        };

        out.extend((1..=n).map(|k| interpolate(lo, hi, k, n)));
    }
    Ok(out)
}
