use crate::io::{Format, error::Error};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

static LINE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+-(\s|$)").expect("valid line-number pattern"));

/// Columns after the line-number field that belong to the echo prefix.
const ECHO_PREFIX_PAD: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeVersion {
    Mcnpx,
    Mcnp6,
}

impl CodeVersion {
    /// Width the code reserves for the echoed line number.
    pub fn line_number_width(self) -> usize {
        match self {
            CodeVersion::Mcnpx => 6,
            CodeVersion::Mcnp6 => 11,
        }
    }
}

/// Identifies the producing code from the first line of a listing.
pub fn detect_version(first_line: &str) -> Result<CodeVersion, Error> {
    if first_line.contains("MCNP6") || first_line.contains("MCNP_6.20") {
        Ok(CodeVersion::Mcnp6)
    } else if first_line.contains("mcnpx") {
        Ok(CodeVersion::Mcnpx)
    } else {
        Err(Error::MissingVersionMarker)
    }
}

/// Block of the echoed input a card belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Section {
    Title,
    Cells,
    Surfaces,
    Data,
}

impl Section {
    fn next(self) -> Option<Self> {
        match self {
            Section::Title => Some(Section::Cells),
            Section::Cells => Some(Section::Surfaces),
            Section::Surfaces => Some(Section::Data),
            Section::Data => None,
        }
    }
}

/// One logical card of the echoed input with continuation lines merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub section: Section,
    /// Listing line (1-based) the card starts on.
    pub line: usize,
    pub tokens: Vec<String>,
}

impl Card {
    pub fn new(section: Section, line: usize, tokens: Vec<String>) -> Self {
        Self {
            section,
            line,
            tokens,
        }
    }

    /// Lower-cased first token, the card name for data cards.
    pub fn name(&self) -> Option<String> {
        self.tokens.first().map(|t| t.to_ascii_lowercase())
    }
}

/// An MCNP output listing held in memory.
#[derive(Debug, Clone)]
pub struct Listing {
    lines: Vec<String>,
    version: Option<CodeVersion>,
}

impl Listing {
    pub fn read<R: BufRead>(reader: R) -> Result<Self, Error> {
        let lines = reader
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| Error::Io { source: e })?;
        Ok(Self::from_lines(lines))
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.lines().map(str::to_string).collect())
    }

    fn from_lines(lines: Vec<String>) -> Self {
        let first = lines.first().map(String::as_str).unwrap_or_default();
        let version = match detect_version(first) {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!(
                    "{e}; reading the input echo with no line-number offset. \
                     If this is an MCNP listing, make sure mct on the PRDMP card is not -1"
                );
                None
            }
        };
        Self { lines, version }
    }

    pub fn version(&self) -> Option<CodeVersion> {
        self.version
    }

    fn prefix_width(&self) -> usize {
        self.version.map_or(0, CodeVersion::line_number_width) + ECHO_PREFIX_PAD
    }

    /// Lines of the echoed input with the line-number prefix and any inline
    /// `$` comment stripped, paired with their 1-based listing line. Lines
    /// holding nothing but a `$` comment are dropped.
    ///
    /// Every call starts a fresh pass over the listing.
    pub fn echo_lines(&self) -> EchoLines<'_> {
        EchoLines {
            lines: self.lines.iter().enumerate().skip(1),
            width: self.prefix_width(),
        }
    }

    /// Title card of the echoed input.
    pub fn title(&self) -> Option<&str> {
        self.echo_lines().next().map(|(_, text)| text.trim_end())
    }

    /// Logical cards of the echoed input, in listing order.
    pub fn cards(&self) -> Cards<'_> {
        Cards {
            lines: self.echo_lines(),
            section: Section::Title,
            current: None,
            continued: false,
            finished: false,
        }
    }

    /// Cards of one input block.
    pub fn section(&self, section: Section) -> impl Iterator<Item = Card> + '_ {
        self.cards()
            .skip_while(move |c| c.section < section)
            .take_while(move |c| c.section == section)
    }

    /// First data card whose name matches `name` exactly (case-insensitive).
    pub fn data_card(&self, name: &str) -> Option<Card> {
        self.section(Section::Data)
            .find(|c| c.name().is_some_and(|n| n.eq_ignore_ascii_case(name)))
    }
}

pub struct EchoLines<'a> {
    lines: std::iter::Skip<std::iter::Enumerate<std::slice::Iter<'a, String>>>,
    width: usize,
}

impl<'a> Iterator for EchoLines<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        for (i, line) in self.lines.by_ref() {
            let (prefix, body) = split_at_column(line, self.width);
            if LINE_NUMBER.is_match(prefix) {
                let Some(pos) = body.find('$') else {
                    return Some((i + 1, body));
                };
                // A line holding only a `$` comment is not a block delimiter.
                if body[..pos].trim().is_empty() {
                    continue;
                }
                return Some((i + 1, &body[..pos]));
            }
        }
        None
    }
}

fn split_at_column(line: &str, column: usize) -> (&str, &str) {
    match line.char_indices().nth(column) {
        Some((idx, _)) => line.split_at(idx),
        None => (line, ""),
    }
}

pub struct Cards<'a> {
    lines: EchoLines<'a>,
    section: Section,
    current: Option<Card>,
    continued: bool,
    finished: bool,
}

impl Iterator for Cards<'_> {
    type Item = Card;

    fn next(&mut self) -> Option<Card> {
        if self.finished {
            return None;
        }
        loop {
            let Some((line_no, text)) = self.lines.next() else {
                self.finished = true;
                return self.current.take();
            };

            if self.section == Section::Title {
                self.section = Section::Cells;
                continue;
            }

            if text.trim().is_empty() {
                self.continued = false;
                let finished = self.current.take();
                match self.section.next() {
                    Some(next) => self.section = next,
                    None => {
                        self.finished = true;
                        return finished;
                    }
                }
                if finished.is_some() {
                    return finished;
                }
                continue;
            }

            if is_comment(text) {
                continue;
            }
            if is_read_directive(text) {
                log::debug!("skipping READ directive at listing line {line_no}");
                continue;
            }

            let (tokens, ends_with_continuation) = split_tokens(text);
            let is_continuation = self.continued || text.starts_with(char::is_whitespace);
            self.continued = ends_with_continuation;

            match self.current.as_mut() {
                Some(card) if is_continuation => card.tokens.extend(tokens),
                _ => {
                    let card = Card::new(self.section, line_no, tokens);
                    if let Some(finished) = self.current.replace(card) {
                        return Some(finished);
                    }
                }
            }
        }
    }
}

/// A comment card: `c` or `C` followed by a blank or the end of the line.
pub fn is_comment(line: &str) -> bool {
    let mut chars = line.chars();
    matches!(chars.next(), Some('c' | 'C')) && chars.next().is_none_or(char::is_whitespace)
}

fn is_read_directive(line: &str) -> bool {
    let mut words = line.split_whitespace();
    words.next().is_some_and(|w| w.eq_ignore_ascii_case("read"))
        && words.next().is_some_and(|w| w.to_ascii_lowercase().starts_with("file"))
}

/// Splits a card line on blanks and `=`, stopping at a `$` comment or an `&`
/// continuation mark. Comment lines yield no tokens.
pub fn tokenize(line: &str) -> Vec<String> {
    split_tokens(line).0
}

fn split_tokens(line: &str) -> (Vec<String>, bool) {
    let mut tokens = Vec::new();
    if is_comment(line) {
        return (tokens, false);
    }
    for raw in line.split(|c: char| c.is_whitespace() || c == '=') {
        if raw.is_empty() {
            continue;
        }
        if raw == "&" {
            return (tokens, true);
        }
        if let Some(pos) = raw.find('$') {
            if pos > 0 {
                tokens.push(raw[..pos].to_string());
            }
            return (tokens, false);
        }
        tokens.push(raw.to_string());
    }
    (tokens, false)
}

pub(crate) fn parse_number<T: std::str::FromStr>(
    token: &str,
    line: usize,
    what: &str,
) -> Result<T, Error> {
    token
        .parse::<T>()
        .map_err(|_| Error::parse(Format::Listing, line, format!("invalid {what} '{token}'")))
}
