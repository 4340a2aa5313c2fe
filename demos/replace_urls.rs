// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Two small illustrations of composing the public API: a replace-all
//! helper built around a single-capture pattern, and a loop that pulls
//! every URL out of a string. Neither is part of the crate's public API.

/// Replace every match of `pattern` (which must have exactly one capturing
/// group) with `sub`, keeping the bytes outside the captured group as-is.
fn replace(pattern: &str, text: &str, sub: &str) -> Result<String, slre::Error> {
    let mut out = String::new();
    let mut rest = text;
    loop {
        match slre::find(pattern, rest) {
            Ok(m) => {
                let cap = m.capture(0).expect("pattern has exactly one group");
                let base = rest.as_ptr() as usize;
                let cap_start = cap.as_bytes().as_ptr() as usize - base;
                let cap_end = cap_start + cap.as_bytes().len();
                let match_end = m.as_bytes().as_ptr() as usize - base + m.as_bytes().len();

                out.push_str(&rest[..cap_start]);
                out.push_str(sub);
                out.push_str(&rest[cap_end..match_end]);
                rest = &rest[match_end..];
            }
            Err(slre::Error::NoMatch) => {
                out.push_str(rest);
                break;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(out)
}

fn find_all_urls(text: &str) -> Result<Vec<String>, slre::Error> {
    let pattern = "(?i)((https?://)[^\\s/'\"<>]+/?[^\\s'\"<>]*)";
    let mut found = Vec::new();
    let mut rest = text;
    loop {
        match slre::find(pattern, rest) {
            Ok(m) => {
                found.push(String::from_utf8_lossy(m.as_bytes()).into_owned());
                let consumed = m.as_bytes().as_ptr() as usize - rest.as_bytes().as_ptr() as usize
                    + m.as_bytes().len();
                if consumed == 0 || consumed > rest.len() {
                    break;
                }
                rest = &rest[consumed..];
            }
            Err(_) => break,
        }
    }
    Ok(found)
}

fn main() -> Result<(), slre::Error> {
    let greeting = replace(
        "({{.+?}})",
        "Good morning, {{foo}}. How are you, {{bar}}?",
        "Bob",
    )?;
    println!("{greeting}");

    let html = "<img src=\"HTTPS://FOO.COM/x?b#c=tab1\"/> \
                 <a href=\"http://cesanta.com\">some link</a>";
    for url in find_all_urls(html)? {
        println!("Found URL: [{url}]");
    }

    Ok(())
}
