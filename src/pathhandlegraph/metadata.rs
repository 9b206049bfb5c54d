/*!

Structured path metadata, and its encoding in path names.

Path names encode their metadata as `sample#haplotype#locus`, or
`sample#locus` for references, optionally followed by a subrange
`:start` or `:start-end`. The start is written 1-based, and the end
is written as the exclusive 0-based end, so that `chr1:1-100` covers
the first hundred bases.

*/

use bstr::{BString, ByteSlice};

use crate::error::{HandleGraphError, Result};

const SEPARATOR: u8 = b'#';
const RANGE_START_SEPARATOR: u8 = b':';
const RANGE_END_SEPARATOR: u8 = b'-';

/// What a path represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSense {
    /// Any path that is neither a reference nor a haplotype, such as
    /// an annotation.
    Generic,
    /// A reference assembly, with a sample and a locus.
    Reference,
    /// A haplotype of a sample, with a haplotype number and a locus.
    Haplotype,
}

/// The part of a longer sequence that a path covers, in 0-based,
/// end-exclusive coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subrange {
    pub start: usize,
    pub end: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathMetadata {
    pub sense: PathSense,
    pub sample: Option<BString>,
    pub locus: BString,
    pub haplotype: Option<usize>,
    pub phase_block: Option<usize>,
    pub subrange: Option<Subrange>,
}

impl PathMetadata {
    pub fn generic<T: Into<BString>>(name: T) -> Self {
        PathMetadata {
            sense: PathSense::Generic,
            sample: None,
            locus: name.into(),
            haplotype: None,
            phase_block: None,
            subrange: None,
        }
    }

    pub fn reference<S, L>(sample: S, locus: L) -> Self
    where
        S: Into<BString>,
        L: Into<BString>,
    {
        PathMetadata {
            sense: PathSense::Reference,
            sample: Some(sample.into()),
            locus: locus.into(),
            haplotype: None,
            phase_block: None,
            subrange: None,
        }
    }

    pub fn haplotype<S, L>(sample: S, haplotype: usize, locus: L) -> Self
    where
        S: Into<BString>,
        L: Into<BString>,
    {
        PathMetadata {
            sense: PathSense::Haplotype,
            sample: Some(sample.into()),
            locus: locus.into(),
            haplotype: Some(haplotype),
            phase_block: None,
            subrange: None,
        }
    }

    pub fn with_subrange(mut self, start: usize, end: Option<usize>) -> Self {
        self.subrange = Some(Subrange { start, end });
        self
    }

    pub fn with_phase_block(mut self, phase_block: usize) -> Self {
        self.phase_block = Some(phase_block);
        self
    }

    /// Encode the metadata as a path name. Fails if the fields that
    /// are present don't fit the sense of the path.
    pub fn path_name(&self) -> Result<BString> {
        use std::io::Write;

        let mut name: Vec<u8> = Vec::new();

        match (&self.sample, self.sense) {
            (Some(_), PathSense::Generic) => {
                return Err(HandleGraphError::InvalidPathMetadata(
                    "generic path cannot have a sample",
                ))
            }
            (Some(sample), _) => {
                name.extend_from_slice(sample);
                name.push(SEPARATOR);
            }
            (None, PathSense::Reference) => {
                return Err(HandleGraphError::InvalidPathMetadata(
                    "reference path must have a sample name",
                ))
            }
            (None, PathSense::Haplotype) => {
                return Err(HandleGraphError::InvalidPathMetadata(
                    "haplotype path must have a sample name",
                ))
            }
            (None, PathSense::Generic) => (),
        }

        match (self.haplotype, self.sense) {
            (Some(_), PathSense::Generic) => {
                return Err(HandleGraphError::InvalidPathMetadata(
                    "generic path cannot have a haplotype number",
                ))
            }
            (Some(hap), _) => {
                // writing to a Vec cannot fail
                let _ = write!(name, "{}", hap);
                name.push(SEPARATOR);
            }
            (None, PathSense::Haplotype) => {
                return Err(HandleGraphError::InvalidPathMetadata(
                    "haplotype path must have a haplotype number",
                ))
            }
            (None, _) => (),
        }

        if self.locus.is_empty() {
            return Err(HandleGraphError::InvalidPathMetadata(
                "path must have a locus",
            ));
        }
        name.extend_from_slice(&self.locus);

        if let Some(range) = self.subrange {
            name.push(RANGE_START_SEPARATOR);
            let _ = write!(name, "{}", range.start + 1);
            if let Some(end) = range.end {
                name.push(RANGE_END_SEPARATOR);
                let _ = write!(name, "{}", end);
            }
        }

        Ok(name.into())
    }

    /// Parse the metadata encoded in a path name. Names that don't
    /// follow the format are treated as generic paths named by the
    /// entire name.
    pub fn parse(name: &[u8]) -> PathMetadata {
        Self::parse_structured(name)
            .unwrap_or_else(|| PathMetadata::generic(name))
    }

    fn parse_structured(name: &[u8]) -> Option<PathMetadata> {
        let parts: Vec<&[u8]> = name.split_str(&[SEPARATOR]).collect();

        let (sample, haplotype, rest) = match parts.as_slice() {
            [_] => return None,
            [sample, rest] => (*sample, None, *rest),
            [sample, hap, rest] => (*sample, Some(parse_number(hap)?), *rest),
            _ => return None,
        };

        if sample.contains(&b'[') {
            return None;
        }

        let (locus, subrange) = split_subrange(rest)?;

        let sense = match haplotype {
            None | Some(0) => PathSense::Reference,
            Some(_) => PathSense::Haplotype,
        };

        Some(PathMetadata {
            sense,
            sample: Some(sample.into()),
            locus: locus.into(),
            haplotype,
            phase_block: None,
            subrange,
        })
    }
}

fn parse_number(bytes: &[u8]) -> Option<usize> {
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    bytes.to_str().ok()?.parse().ok()
}

/// Split a trailing `:start[-end]` from a locus. Returns `None` if
/// the range is present but uses a 0 start.
fn split_subrange(rest: &[u8]) -> Option<(&[u8], Option<Subrange>)> {
    let colon = match rest.rfind_byte(RANGE_START_SEPARATOR) {
        Some(ix) => ix,
        None => return Some((rest, None)),
    };

    let locus = &rest[..colon];
    let range = &rest[colon + 1..];

    let (start, end) = match range.find_byte(RANGE_END_SEPARATOR) {
        Some(dash) => {
            let start = parse_number(&range[..dash]);
            let end = parse_number(&range[dash + 1..]);
            match (start, end) {
                (Some(s), Some(e)) => (s, Some(e)),
                _ => return Some((rest, None)),
            }
        }
        None => match parse_number(range) {
            Some(s) => (s, None),
            None => return Some((rest, None)),
        },
    };

    if start == 0 {
        return None;
    }

    Some((
        locus,
        Some(Subrange {
            start: start - 1,
            end,
        }),
    ))
}
