//! Report page handling: locating the preformatted report text and
//! cutting it into per-instrument blocks.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::DataError;

static PRE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<pre\b[^>]*>(.*?)</pre\s*>").expect("static <pre> pattern compiles")
});
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static tag pattern compiles"));
static CODE_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bCode\b").expect("static code pattern compiles"));

static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z]+);")
        .expect("static entity pattern compiles")
});

const NBSP: char = '\u{a0}';

/// Returns the text of the first `<pre>` element of an HTML page.
///
/// # Errors
/// Returns [`DataError::NoPreformattedText`] if the page has no `<pre>` element.
pub fn extract_preformatted(html: &str) -> Result<String, DataError> {
    let inner = PRE_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .ok_or(DataError::NoPreformattedText)?
        .as_str();

    let text = TAG_RE.replace_all(inner, "");
    Ok(decode_entities(&text))
}

/// Decodes named and numeric character references in one pass.
///
/// Non-breaking spaces become plain spaces so that column runs in the
/// report stay space-separated. Unknown references are left as written.
fn decode_entities(text: &str) -> String {
    ENTITY_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let reference = &caps[1];
            let decoded = match reference.strip_prefix('#') {
                Some(number) => decode_numeric(number),
                None => decode_named(reference),
            };
            match decoded {
                Some(NBSP) => " ".to_string(),
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn decode_numeric(number: &str) -> Option<char> {
    let code = match number.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => number.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

fn decode_named(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(NBSP),
        _ => None,
    }
}

/// Splits report text into instrument blocks.
///
/// A block starts at a line containing the word `Code` that follows at
/// least one blank line. Text before the first such line forms its own
/// block; the extractor discards it when it carries no header.
#[must_use]
pub fn split_blocks(text: &str) -> Vec<&str> {
    let text = text.trim();
    let mut blocks = Vec::new();
    let mut start = 0;
    let mut offset = 0;
    let mut after_blank = false;

    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            after_blank = true;
        } else {
            if after_blank && offset > start && CODE_WORD_RE.is_match(line) {
                blocks.push(text[start..offset].trim());
                start = offset;
            }
            after_blank = false;
        }
        offset += line.len();
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        blocks.push(tail);
    }

    blocks.retain(|b| !b.is_empty());
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_pre_section() {
        let html = "<html><body><p>intro</p><PRE class=\"x\">LINE 1\nLINE 2</PRE><pre>second</pre></body></html>";
        assert_eq!(extract_preformatted(html).unwrap(), "LINE 1\nLINE 2");
    }

    #[test]
    fn strips_inner_tags_and_decodes_entities() {
        let html = "<pre><b>S&amp;P 500</b> &lt;E-MINI&gt; &amp;lt;</pre>";
        assert_eq!(extract_preformatted(html).unwrap(), "S&P 500 <E-MINI> &lt;");
    }

    #[test]
    fn decodes_numeric_references() {
        let html = "<pre>A&#160;B&#xA0;C &#x27;Q&#39; &#8217; &#X26;amp;</pre>";
        assert_eq!(
            extract_preformatted(html).unwrap(),
            "A B C 'Q' \u{2019} &amp;"
        );
    }

    #[test]
    fn unknown_or_invalid_references_are_kept() {
        let html = "<pre>&bogus; &#xD800; &copy</pre>";
        assert_eq!(extract_preformatted(html).unwrap(), "&bogus; &#xD800; &copy");
    }

    #[test]
    fn missing_pre_is_an_error() {
        let err = extract_preformatted("<html><body>maintenance</body></html>").unwrap_err();
        assert!(matches!(err, DataError::NoPreformattedText));
    }

    #[test]
    fn splits_on_blank_line_before_code_line() {
        let text = "\n\
PREAMBLE Disaggregated Commitments\n\
\n\
GOLD - COMMODITY EXCHANGE INC.   Code-088691\n\
COMMITMENTS\n\
 1 2 3\n\
\n\
   \n\
SILVER - COMMODITY EXCHANGE INC.   Code-084691\n\
COMMITMENTS\n\
 4 5 6\n\n";
        let blocks = split_blocks(text);
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], "PREAMBLE Disaggregated Commitments");
        assert!(blocks[1].starts_with("GOLD"));
        assert!(blocks[1].ends_with("1 2 3"));
        assert!(blocks[2].starts_with("SILVER"));
    }

    #[test]
    fn blank_lines_without_code_line_do_not_split() {
        let text = "EURO FX   Code-099741\nCOMMITMENTS\n\nCHANGES FROM 01/01/25\n 1 2\n";
        let blocks = split_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].contains("CHANGES FROM"));
    }

    #[test]
    fn code_must_be_a_whole_word() {
        let text = "A   Code-1\n\nCodes of conduct\n";
        assert_eq!(split_blocks(text).len(), 1);
    }

    #[test]
    fn empty_text_has_no_blocks() {
        assert!(split_blocks("").is_empty());
        assert!(split_blocks(" \n\n ").is_empty());
    }
}
