use pretty_assertions::assert_eq;

use super::*;

fn words(src: &str) -> Vec<&str> {
    split_words(src).iter().map(Token::text).collect()
}

fn statements(src: &str) -> Vec<&str> {
    split_statements(src, b';').iter().map(Token::text).collect()
}

// Words

#[test]
fn whitespace_separates_plain_words() {
    assert_eq!(words("  add 2\t3\n"), vec!["add", "2", "3"]);
}

#[test]
fn empty_input_has_no_words() {
    assert!(split_words("").is_empty());
    assert!(split_words(" \t\n ").is_empty());
}

#[test]
fn each_bracket_kind_is_one_word() {
    assert_eq!(
        words("f (a b) {c d} [e f] <g h>"),
        vec!["f", "(a b)", "{c d}", "[e f]", "<g h>"]
    );
}

#[test]
fn nested_group_stays_one_word() {
    assert_eq!(words("{a (b) c}"), vec!["{a (b) c}"]);
    assert_eq!(words("((a (b)) c) d"), vec!["((a (b)) c)", "d"]);
}

#[test]
fn escaped_closer_does_not_end_group() {
    assert_eq!(words(r"(a \) b) c"), vec![r"(a \) b)", "c"]);
}

#[test]
fn escaped_opener_is_a_plain_byte() {
    assert_eq!(words(r"a\(b c"), vec![r"a\(b", "c"]);
}

#[test]
fn unbalanced_group_falls_back_to_plain_word() {
    assert_eq!(words("(a b"), vec!["(a", "b"]);
    assert_eq!(words("{never"), vec!["{never"]);
}

#[test]
fn group_glued_to_text_splits_after_close() {
    assert_eq!(words("{a}b"), vec!["{a}", "b"]);
}

#[test]
fn quoted_run_is_one_word() {
    assert_eq!(words(r#"print "a b" 'c d'"#), vec!["print", r#""a b""#, "'c d'"]);
}

#[test]
fn unterminated_quote_runs_to_end() {
    assert_eq!(words("say \"oh no"), vec!["say", "\"oh no"]);
}

#[test]
fn offsets_point_into_source() {
    let src = "ab  {c d}";
    let tokens = split_words(src);
    assert_eq!(tokens[0].offset(), 0);
    assert_eq!(tokens[1].offset(), 4);
    assert_eq!(&src[tokens[1].offset()..tokens[1].offset() + tokens[1].len()], "{c d}");
}

#[test]
fn non_ascii_text_is_preserved() {
    assert_eq!(words("{héllo wörld} ünï"), vec!["{héllo wörld}", "ünï"]);
}

// Statements

#[test]
fn delimiter_separates_statements() {
    assert_eq!(statements("a 1; b 2;c"), vec!["a 1", " b 2", "c"]);
}

#[test]
fn trailing_delimiter_adds_nothing() {
    assert_eq!(statements("a;"), vec!["a"]);
    assert!(statements("").is_empty());
}

#[test]
fn empty_statements_between_delimiters_are_kept() {
    assert_eq!(statements("a;;b"), vec!["a", "", "b"]);
}

#[test]
fn delimiter_inside_group_is_ignored() {
    assert_eq!(statements("f (a; b); g"), vec!["f (a; b)", " g"]);
    assert_eq!(statements("{x; y}; z"), vec!["{x; y}", " z"]);
    assert_eq!(statements("[1;2] <3;4>"), vec!["[1;2] <3;4>"]);
}

#[test]
fn other_kinds_inside_a_group_do_not_count() {
    // The lone `(` inside braces must not keep depth open after `}`.
    assert_eq!(statements("{ ( }; b"), vec!["{ ( }", " b"]);
}

#[test]
fn escaped_bracket_does_not_open_depth() {
    assert_eq!(statements(r"a\(b; c"), vec![r"a\(b", " c"]);
}

#[test]
fn quotes_do_not_suppress_splitting() {
    assert_eq!(statements("say don't; b; won't"), vec!["say don't", " b", " won't"]);
    assert_eq!(statements(r#"print "a;b""#), vec![r#"print "a"#, r#"b""#]);
}

#[test]
fn stray_closer_does_not_suppress_splitting() {
    assert_eq!(statements("a ); b"), vec!["a )", " b"]);
}

#[test]
fn custom_delimiter() {
    let parts: Vec<&str> = split_statements("a 1\nb 2", b'\n').iter().map(Token::text).collect();
    assert_eq!(parts, vec!["a 1", "b 2"]);
}
