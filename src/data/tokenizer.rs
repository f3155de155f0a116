use super::model::RawRow;

/// Character that opens and closes an escaped span.
pub const QUOTE: char = '"';

/// Field delimiter of the death-rate CSV.
pub const DELIMITER: char = ',';

// ---------------------------------------------------------------------------
// Quote-aware line tokenizer
// ---------------------------------------------------------------------------

/// Split one line into fields, rejoining quoted spans that contain the
/// delimiter.
///
/// The line is split naively first. A naive field holding a quote opens a
/// span that runs to the next naive field holding a quote; the span is
/// rejoined with the delimiter and the text between its first two quotes
/// becomes one field. An opening quote with no partner is passed through
/// verbatim.
///
/// Never fails: an empty line yields a single empty field.
pub fn tokenize(line: &str, delimiter: char) -> RawRow {
    let naive: Vec<&str> = line.split(delimiter).collect();
    let mut fields = Vec::with_capacity(naive.len());

    let mut i = 0;
    while i < naive.len() {
        let field = naive[i];

        if !field.contains(QUOTE) {
            fields.push(field.to_string());
            i += 1;
            continue;
        }

        let closing = naive[i + 1..]
            .iter()
            .position(|f| f.contains(QUOTE))
            .map(|offset| i + 1 + offset);

        match closing {
            Some(end) => {
                let joined = naive[i..=end].join(&delimiter.to_string());
                fields.push(between_quotes(&joined).to_string());
                i = end + 1;
            }
            None => {
                fields.push(field.to_string());
                i += 1;
            }
        }
    }

    fields
}

/// Text between the first and second quote characters.
fn between_quotes(s: &str) -> &str {
    s.split(QUOTE).nth(1).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn splits_plain_fields() {
        assert_eq!(tokenize("World,WLD,1990", ','), vec!["World", "WLD", "1990"]);
    }

    #[test]
    fn quoted_span_keeps_embedded_delimiter() {
        assert_eq!(tokenize(r#"A,"B,C",D"#, ','), vec!["A", "B,C", "D"]);
    }

    #[test]
    fn quoted_span_over_several_delimiters() {
        let line = r#""Saint Helena, Ascension, and Tristan",SHN,2001"#;
        assert_eq!(
            tokenize(line, ','),
            vec!["Saint Helena, Ascension, and Tristan", "SHN", "2001"]
        );
    }

    #[test]
    fn quoted_field_always_scans_to_the_next_quote() {
        // `"A"` opens a span that runs to `"C"`; only the text between the
        // first two quotes of the rejoined span survives.
        assert_eq!(tokenize(r#""A",B,"C""#, ','), vec!["A"]);
    }

    #[test]
    fn scan_resumes_after_the_closing_field() {
        // span `"USA",US,"1` yields USA; `5"` has no partner left
        assert_eq!(tokenize(r#""USA",US,"1,5""#, ','), vec!["USA", "5\""]);
    }

    #[test]
    fn unmatched_quote_passes_through() {
        assert_eq!(tokenize(r#"A,"B,C"#, ','), vec!["A", "\"B", "C"]);
    }

    #[test]
    fn empty_line_is_one_empty_field() {
        assert_eq!(tokenize("", ','), vec![String::new()]);
    }

    #[test]
    fn honours_other_delimiters() {
        assert_eq!(tokenize(r#"a;"b;c";d"#, ';'), vec!["a", "b;c", "d"]);
    }

    proptest! {
        /// Property: joining unquoted fields and re-tokenizing is lossless
        #[test]
        fn prop_roundtrip_without_quotes(fields in prop::collection::vec("[^\",]{0,12}", 1..10)) {
            let line = fields.join(",");
            prop_assert_eq!(tokenize(&line, ','), fields);
        }

        /// Property: one quoted field with embedded commas is reconstructed
        #[test]
        fn prop_quoted_field_reconstructed(
            before in "[a-z]{1,6}",
            inner in prop::collection::vec("[a-z ]{0,6}", 2..5),
            after in "[a-z]{1,6}",
        ) {
            let quoted = inner.join(",");
            let line = format!("{before},\"{quoted}\",{after}");
            prop_assert_eq!(tokenize(&line, ','), vec![before, quoted, after]);
        }
    }
}
