// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A compact, embeddable matcher for a small Perl-like regular-expression
//! subset, built around two passes over a pattern: a preparer that scans it
//! once into fixed-capacity bracket and branch tables, and an evaluator that
//! walks those tables with a recursive-backtracking search.
//!
//! ```
//! let m = slre::find("(\\d+)-(\\d+)", "order 12-45 shipped").unwrap();
//! assert_eq!(m.as_bytes(), b"12-45");
//! assert_eq!(m.capture(0).unwrap().as_bytes(), b"12");
//! assert_eq!(m.capture(1).unwrap().as_bytes(), b"45");
//! ```

mod error;
mod eval;
mod ops;
mod prepare;

pub use error::{Error, Result};

use eval::{choose_branch, Capture as RawCapture};
use prepare::prepare;

/// Upper bound on the number of capturing groups this crate will track;
/// matches [`prepare::MAX_BRACKETS`] minus the synthetic whole-pattern pair.
pub const MAX_CAPTURES: usize = prepare::MAX_BRACKETS - 1;

/// A capturing group's matched bytes.
pub type Capture<'t> = RawCapture<'t>;

/// A successful top-level match: the overall matched span, plus whatever
/// capturing groups the pattern defined. Storage is a fixed-size array, not
/// a `Vec` (matching groups are never more numerous than [`MAX_CAPTURES`]),
/// and the matcher itself allocates no heap.
#[derive(Debug, Clone)]
pub struct Match<'t> {
    text: &'t [u8],
    caps: [Option<Capture<'t>>; MAX_CAPTURES],
    num_groups: usize,
}

impl<'t> Match<'t> {
    /// The bytes matched by the whole pattern.
    pub fn as_bytes(&self) -> &'t [u8] {
        self.text
    }

    /// The `n`-th capturing group (0-indexed, left-to-right by `(`),
    /// or `None` if that group did not participate in this match.
    pub fn capture(&self, n: usize) -> Option<Capture<'t>> {
        self.caps.get(n).copied().flatten()
    }

    /// The capturing groups the pattern defines, in order; an entry is
    /// `None` if that group did not participate in this particular match.
    pub fn captures(&self) -> &[Option<Capture<'t>>] {
        &self.caps[..self.num_groups]
    }
}

/// Strip a leading `(?i)` flag, returning the remaining pattern and whether
/// case-insensitive matching was requested.
fn strip_flags(pattern: &[u8]) -> (&[u8], bool) {
    if let Some(rest) = pattern.strip_prefix(b"(?i)") {
        (rest, true)
    } else {
        (pattern, false)
    }
}

/// Search `input` for the leftmost match of `pattern`, trying successive
/// start offsets `0..=input.len()` unless the pattern is anchored with a
/// leading `^`, in which case only offset 0 is tried. Reports
/// [`Error::CapsTooSmall`] if the pattern has more capturing groups than
/// `cap_capacity` (pass [`MAX_CAPTURES`] to accept any pattern this crate
/// can represent at all).
pub fn find_with_capacity<'t>(
    pattern: &str,
    input: &'t str,
    cap_capacity: usize,
) -> Result<Match<'t>> {
    let (body, ignore_case) = strip_flags(pattern.as_bytes());
    let info = prepare(body, ignore_case, cap_capacity)?;
    let input = input.as_bytes();

    let mut last = Error::NoMatch;
    let last_start = if info.anchored() { 0 } else { input.len() };

    for start in 0..=last_start {
        let mut caps = [None; MAX_CAPTURES];
        let num_groups = info.num_brackets - 1;
        tracing::trace!(start, "search: trying start offset");
        match choose_branch(&info, 0, &input[start..], &mut caps[..num_groups]) {
            Ok(len) => {
                return Ok(Match {
                    text: &input[start..start + len],
                    caps,
                    num_groups,
                })
            }
            Err(e) => last = e,
        }
    }
    Err(last)
}

/// [`find_with_capacity`] with the capacity fixed at [`MAX_CAPTURES`].
pub fn find<'t>(pattern: &str, input: &'t str) -> Result<Match<'t>> {
    find_with_capacity(pattern, input, MAX_CAPTURES)
}

/// `true` if `pattern` matches `input` at any offset.
pub fn is_match(pattern: &str, input: &str) -> Result<bool> {
    match find(pattern, input) {
        Ok(_) => Ok(true),
        Err(Error::NoMatch) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Shorthand for [`find`] followed by reading out the captures.
pub fn captures<'t>(pattern: &str, input: &'t str) -> Result<[Option<Capture<'t>>; MAX_CAPTURES]> {
    find(pattern, input).map(|m| m.caps)
}
