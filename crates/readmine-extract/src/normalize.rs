//! Text canonicalization applied once, before any pattern matching.

use once_cell::sync::Lazy;
use regex::Regex;

static DASH_RE: Lazy<Regex> = Lazy::new(|| Regex::new("[\u{2013}\u{2014}\u{2212}]").unwrap());
static TRAILING_WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+\n").unwrap());
static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Canonicalize raw extracted text.
///
/// Line endings are unified first so every later pattern only sees `\n`;
/// en/em dashes and the unicode minus fold to `-` before hyphenated line
/// wraps are joined, so a wrap after any dash variant joins the same way.
/// The trailing-whitespace strip and the wrap join repeat together until
/// neither changes the text: the strip can expose a wrap (`word- \n`) and
/// the join can strand a space before the following newline (`said -\n\n`).
/// Blank runs collapse last. The result is a fixed point: running the
/// function on its own output changes nothing.
pub fn normalize(raw: &str) -> String {
    let text = raw.replace("\r\n", "\n").replace('\r', "\n");
    let mut text = DASH_RE.replace_all(&text, "-").into_owned();
    // The strip can expose a wrap ("a- \n") and the join can strand a space
    // before the following newline ("a -\n\n") or expose another dash
    // ("a--\nb"), so the two repeat until neither fires. Both passes only
    // remove characters.
    loop {
        let pass = TRAILING_WS_RE.replace_all(&text, "\n").replace("-\n", "");
        if pass == text {
            break;
        }
        text = pass;
    }
    BLANK_RUN_RE.replace_all(&text, "\n\n").into_owned()
}
