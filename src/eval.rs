// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The evaluator: a branch chooser that iterates alternatives within one
//! bracket pair, and a sequence matcher that walks the atoms of one branch,
//! handling quantifiers by local recursion. The two are mutually recursive
//! through nested groups.

use crate::error::{Error, Result};
use crate::ops::{get_op_len, is_quantifier, op_len};
use crate::prepare::Prepared;

/// A capture: the substring matched by one non-synthetic bracket pair,
/// borrowed from the caller's input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture<'t> {
    pub bytes: &'t [u8],
}

impl<'t> Capture<'t> {
    pub fn as_bytes(&self) -> &'t [u8] {
        self.bytes
    }
}

/// Byte range, within `info.pattern`, of the `alt`-th alternative of the
/// bracket pair's body (0-indexed; `alt == branch_count` is the final one).
fn branch_range(info: &Prepared<'_>, pair: usize, alt: usize) -> (usize, usize) {
    let bp = &info.brackets[pair];
    let body_end = bp.body_start + bp.len();
    if bp.branch_count == 0 {
        return (bp.body_start, body_end);
    }
    let first = bp.first_branch;
    let start = if alt == 0 {
        bp.body_start
    } else {
        info.branches[first + alt - 1].bar_pos + 1
    };
    let end = if alt == bp.branch_count {
        body_end
    } else {
        info.branches[first + alt].bar_pos
    };
    (start, end)
}

/// Try each alternative of `pair` in left-to-right order against `input`,
/// returning the first that matches.
pub(crate) fn choose_branch<'t>(
    info: &Prepared<'_>,
    pair: usize,
    input: &'t [u8],
    caps: &mut [Option<Capture<'t>>],
) -> Result<usize> {
    let branch_count = info.brackets[pair].branch_count;
    let mut last = Error::NoMatch;
    for alt in 0..=branch_count {
        let (start, end) = branch_range(info, pair, alt);
        tracing::trace!(pair, alt, start, end, "branch chooser: trying alternative");
        match match_sequence(info, &info.pattern[start..end], input, pair, caps) {
            Ok(n) => return Ok(n),
            Err(e) => last = e,
        }
    }
    Err(last)
}

/// Length of the atom at `pattern[i]`. For `(`, this is the body length of
/// the next nested bracket pair (`cursor + 1`) plus 2 for the delimiters;
/// nested pairs are consumed in preparation order, so a running cursor
/// suffices.
fn atom_len(info: &Prepared<'_>, pattern: &[u8], i: usize, cursor: usize) -> Result<usize> {
    if pattern[i] == b'(' {
        let next_pair = cursor + 1;
        if next_pair >= info.num_brackets {
            return Err(Error::Internal);
        }
        Ok(info.brackets[next_pair].len() + 2)
    } else {
        get_op_len(&pattern[i..])
    }
}

const fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0B | 0x0C | b'\r')
}

fn hex_digit(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}

/// Single-byte match test shared by literal atoms and set items: `.`
/// (always true; bounds are checked by the caller), `\S \s \d`, `\xHH`, an
/// escaped metacharacter, or a plain literal byte.
fn match_op(atom: &[u8], b: u8, ignore_case: bool) -> bool {
    if atom[0] == b'\\' {
        match atom[1] {
            b'S' => !is_space(b),
            b's' => is_space(b),
            b'd' => b.is_ascii_digit(),
            b'x' => (hex_digit(atom[2]) << 4 | hex_digit(atom[3])) == b,
            c => c == b,
        }
    } else if ignore_case {
        atom[0].to_ascii_lowercase() == b.to_ascii_lowercase()
    } else {
        atom[0] == b
    }
}

/// Evaluate a `[...]` set body (without the surrounding brackets, but
/// including a leading `^` for negation) against one input byte.
fn match_set(body: &[u8], b: u8, ignore_case: bool) -> Result<bool> {
    let (invert, body) = match body.first() {
        Some(b'^') => (true, &body[1..]),
        _ => (false, body),
    };

    let mut i = 0;
    let mut matched = false;
    while i < body.len() && !matched {
        let is_range =
            body[i] != b'-' && i + 2 < body.len() && body[i + 1] == b'-' && body[i + 2] != b']';
        if is_range {
            let (lo, hi) = (body[i], body[i + 2]);
            matched = if ignore_case {
                let c = b.to_ascii_lowercase();
                c >= lo.to_ascii_lowercase() && c <= hi.to_ascii_lowercase()
            } else {
                b >= lo && b <= hi
            };
            i += 3;
        } else {
            let n = op_len(&body[i..])?;
            let item = &body[i..i + n];
            matched = if item[0] == b'.' { b == b'.' } else { match_op(item, b, ignore_case) };
            i += n;
        }
    }
    Ok(matched != invert)
}

/// Execute one atom once, starting at local offset `pos` of `full_input`.
/// Returns the number of bytes consumed. `full_input` and `pos` together
/// give `^`/`$` their call-local meaning (see spec §4.4/§4.5): `^` matches
/// only at `pos == 0`, `$` only at `pos == full_input.len()`.
fn exec_atom<'t>(
    info: &Prepared<'_>,
    pattern: &[u8],
    i: usize,
    step: usize,
    full_input: &'t [u8],
    pos: usize,
    cursor: usize,
    caps: &mut [Option<Capture<'t>>],
) -> Result<usize> {
    let atom = &pattern[i..i + step];
    match atom[0] {
        b'^' => {
            if pos == 0 {
                Ok(0)
            } else {
                Err(Error::NoMatch)
            }
        }
        b'$' => {
            if pos == full_input.len() {
                Ok(0)
            } else {
                Err(Error::NoMatch)
            }
        }
        b'(' => {
            let pair = cursor + 1;
            if pair >= info.num_brackets {
                return Err(Error::Internal);
            }
            let n = choose_branch(info, pair, &full_input[pos..], caps)?;
            if let Some(slot) = caps.get_mut(pair - 1) {
                *slot = Some(Capture { bytes: &full_input[pos..pos + n] });
            }
            Ok(n)
        }
        b'[' => {
            if pos >= full_input.len() {
                return Err(Error::NoMatch);
            }
            let body = &atom[1..atom.len() - 1];
            if match_set(body, full_input[pos], info.ignore_case)? {
                Ok(1)
            } else {
                Err(Error::NoMatch)
            }
        }
        _ => {
            if pos >= full_input.len() {
                return Err(Error::NoMatch);
            }
            if match_op(atom, full_input[pos], info.ignore_case) {
                Ok(1)
            } else {
                Err(Error::NoMatch)
            }
        }
    }
}

/// Walk the atoms of one branch body (`pattern`) against `full_input`,
/// handling quantifiers by local recursion. `cursor` is the bracket-pair
/// index owning this branch; it advances by one for every `(` atom this
/// call passes over, in source order, regardless of whether that atom
/// sits under a quantifier, so that later atoms in the same branch (and
/// the caller, for sibling branches) see correctly numbered nested pairs.
pub(crate) fn match_sequence<'t>(
    info: &Prepared<'_>,
    pattern: &[u8],
    full_input: &'t [u8],
    mut cursor: usize,
    caps: &mut [Option<Capture<'t>>],
) -> Result<usize> {
    let mut i = 0usize;
    let mut j = 0usize;

    while i < pattern.len() && j <= full_input.len() {
        let step = atom_len(info, pattern, i, cursor)?;
        if is_quantifier(pattern[i]) {
            return Err(Error::UnexpectedQuantifier);
        }

        let is_group = pattern[i] == b'(';
        let next_cursor = if is_group { cursor + 1 } else { cursor };

        let quant_pos = i + step;
        let quantifier = (quant_pos < pattern.len() && is_quantifier(pattern[quant_pos]))
            .then(|| pattern[quant_pos]);

        match quantifier {
            Some(b'?') => {
                if let Ok(n) = exec_atom(info, pattern, i, step, full_input, j, cursor, caps) {
                    j += n;
                }
                cursor = next_cursor;
                i = quant_pos + 1;
            }
            Some(q) => {
                // '*' or '+', optionally followed by a non-greedy '?'.
                let plus = q == b'+';
                let mut rest = quant_pos + 1;
                let non_greedy = rest < pattern.len() && pattern[rest] == b'?';
                if non_greedy {
                    rest += 1;
                }

                let mut j2 = j;
                let mut accepted: Option<usize> = None;
                loop {
                    let n1 = match exec_atom(info, pattern, i, step, full_input, j2, cursor, caps) {
                        Ok(n) => n,
                        Err(_) => break,
                    };
                    let candidate = if rest >= pattern.len() {
                        Some(j2 + n1)
                    } else {
                        match match_sequence(
                            info,
                            &pattern[rest..],
                            &full_input[j2 + n1..],
                            next_cursor,
                            caps,
                        ) {
                            Ok(n2) => Some(j2 + n1 + n2),
                            Err(_) => None,
                        }
                    };
                    if candidate.is_some() {
                        accepted = candidate;
                    }
                    if accepted.is_some() && non_greedy {
                        break;
                    }
                    if n1 == 0 {
                        // Zero-width repetition; retrying would loop forever.
                        break;
                    }
                    j2 += n1;
                }

                return match accepted {
                    Some(n) => Ok(n),
                    None if plus => Err(Error::NoMatch),
                    None => Ok(0),
                };
            }
            None => {
                let n = exec_atom(info, pattern, i, step, full_input, j, cursor, caps)?;
                j += n;
                cursor = next_cursor;
                i += step;
            }
        }
    }

    Ok(j)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prepare::prepare;

    fn run(pattern: &str, input: &str) -> Result<usize> {
        let info = prepare(pattern.as_bytes(), false, 0)?;
        choose_branch(&info, 0, input.as_bytes(), &mut [])
    }

    #[test]
    fn literal_prefix() {
        assert_eq!(run("fo", "foo"), Ok(2));
    }

    #[test]
    fn dot_plus_then_literal() {
        assert_eq!(run(".+k.", "fooklmn"), Ok(5));
    }

    #[test]
    fn greedy_vs_non_greedy() {
        assert_eq!(run(".+?c", "abcabc"), Ok(3));
        assert_eq!(run(".+c", "abcabc"), Ok(6));
    }

    #[test]
    fn alternation_picks_first_success() {
        assert_eq!(run("k(xx|yy)|ca|bc", "abcabc"), Ok(3));
    }

    #[test]
    fn anchors() {
        assert_eq!(run("^o", "fooklmn"), Err(Error::NoMatch));
        assert_eq!(run("n$", "fooklmn"), Ok(7));
        assert_eq!(run("l$", "fooklmn"), Err(Error::NoMatch));
    }

    #[test]
    fn captures_are_recorded() {
        let info = prepare(b"(bc)", false, 1).unwrap();
        let mut caps = [None];
        let n = choose_branch(&info, 0, b"abcdef", &mut caps).unwrap();
        assert_eq!(n, 3);
        assert_eq!(caps[0], Some(Capture { bytes: b"bc" }));
    }

    #[test]
    fn set_ranges_and_negation() {
        assert_eq!(run("[1-5]+", "123456789"), Ok(5));
        assert_eq!(run("[^\\d]+", "abc123"), Ok(3));
    }

    #[test]
    fn zero_width_star_does_not_hang() {
        assert_eq!(run("a*", ""), Ok(0));
    }
}
