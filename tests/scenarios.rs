// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Table-driven tests covering concrete matching scenarios.

use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case("fo", "foo", 2)]
#[case(".+k.", "fooklmn", 5)]
#[case(".+?c", "abcabc", 3)]
#[case(".+c", "abcabc", 6)]
#[case("k(xx|yy)|ca|bc", "abcabc", 3)]
fn matches_expected_length(#[case] pattern: &str, #[case] input: &str, #[case] expected: usize) {
    let m = slre::find(pattern, input).unwrap();
    assert_eq!(m.as_bytes().len(), expected);
}

#[test]
fn ignore_case_flag_widens_a_set() {
    let m = slre::find("(?i)[abc]", "1C2").unwrap();
    assert_eq!(m.as_bytes(), b"C");
    assert_eq!(slre::find("[abc]", "1C2").unwrap_err(), slre::Error::NoMatch);
}

#[test]
fn http_request_line_is_captured() {
    let m = slre::find(
        "^\\s*(\\S+)\\s+(\\S+)\\s+HTTP/(\\d)\\.(\\d)",
        " GET /index.html HTTP/1.0\r\n\r\n",
    )
    .unwrap();
    assert_eq!(m.as_bytes().len(), 25);
    assert_eq!(m.capture(0).unwrap().as_bytes(), b"GET");
    assert_eq!(m.capture(1).unwrap().as_bytes(), b"/index.html");
    assert_eq!(m.capture(2).unwrap().as_bytes(), b"1");
    assert_eq!(m.capture(3).unwrap().as_bytes(), b"0");
}

#[rstest]
#[case("(x))", slre::Error::UnbalancedBrackets)]
#[case("+", slre::Error::UnexpectedQuantifier)]
#[case("\\x", slre::Error::InvalidMetacharacter)]
fn reports_expected_error(#[case] pattern: &str, #[case] expected: slre::Error) {
    assert_eq!(slre::find(pattern, "whatever").unwrap_err(), expected);
}

#[test]
fn anchors_are_boundary_checked() {
    assert_eq!(slre::find("^", "anything").unwrap().as_bytes(), b"");
    assert_eq!(slre::find("$", "anything").unwrap().as_bytes(), b"");
    assert_eq!(slre::find("", "").unwrap().as_bytes(), b"");
}

#[test]
fn empty_input_with_star_and_plus() {
    assert_eq!(slre::find("a*", "").unwrap().as_bytes(), b"");
    assert_eq!(slre::find("a+", "").unwrap_err(), slre::Error::NoMatch);
}
