use molde::interpreter::lexer::{lex, Token};

fn tokens(source: &str) -> Vec<Token> {
    lex(source).into_iter().map(|(token, _)| token).collect()
}

#[test]
fn tokenizes_representative_source() {
    let input = "id 3.27 \"string\" := = + - * / \\ !\n\
                 < > <= >= == != .. ..< && || , ; : . |\n\
                 (){}[] ** % & ^ ~ << >>\n\
                 fn model return true false null if else elif while for break next in";

    let expected = vec![Token::Identifier("id".to_string()),
                        Token::Number(3.27),
                        Token::Str("string".to_string()),
                        Token::Declare,
                        Token::Assign,
                        Token::Plus,
                        Token::Minus,
                        Token::Star,
                        Token::Slash,
                        Token::Backslash,
                        Token::Bang,
                        Token::Lt,
                        Token::Gt,
                        Token::LtEq,
                        Token::GtEq,
                        Token::Eq,
                        Token::NotEq,
                        Token::Range,
                        Token::RangeExclusive,
                        Token::And,
                        Token::Or,
                        Token::Comma,
                        Token::Semi,
                        Token::Colon,
                        Token::Dot,
                        Token::VLine,
                        Token::LParen,
                        Token::RParen,
                        Token::LBrace,
                        Token::RBrace,
                        Token::LBracket,
                        Token::RBracket,
                        Token::Exp,
                        Token::Percent,
                        Token::BitAnd,
                        Token::Caret,
                        Token::Tilde,
                        Token::ShiftLeft,
                        Token::ShiftRight,
                        Token::Function,
                        Token::Model,
                        Token::Return,
                        Token::True,
                        Token::False,
                        Token::Null,
                        Token::If,
                        Token::Else,
                        Token::Elif,
                        Token::While,
                        Token::For,
                        Token::Break,
                        Token::Next,
                        Token::In];

    assert_eq!(tokens(input), expected);
}

#[test]
fn numbers_do_not_absorb_trailing_dots() {
    assert_eq!(tokens("5."), vec![Token::Number(5.0), Token::Dot]);
    assert_eq!(tokens("1..4"),
               vec![Token::Number(1.0), Token::Range, Token::Number(4.0)]);
    assert_eq!(tokens("1..<4"),
               vec![Token::Number(1.0), Token::RangeExclusive, Token::Number(4.0)]);
    assert_eq!(tokens("3.25.5"),
               vec![Token::Number(3.25), Token::Dot, Token::Number(5.0)]);
}

#[test]
fn digits_are_not_identifier_characters() {
    assert_eq!(tokens("1a"),
               vec![Token::Number(1.0), Token::Identifier("a".to_string())]);
}

#[test]
fn identifiers_may_contain_question_marks_and_underscores() {
    assert_eq!(tokens("empty? _plus"),
               vec![Token::Identifier("empty?".to_string()),
                    Token::Identifier("_plus".to_string())]);
}

#[test]
fn keywords_glued_to_identifier_characters_stay_identifiers() {
    assert_eq!(tokens("iffy"), vec![Token::Identifier("iffy".to_string())]);
    assert_eq!(tokens("if?"), vec![Token::Identifier("if?".to_string())]);
}

#[test]
fn string_escapes_are_decoded() {
    assert_eq!(tokens(r#""a\nb""#), vec![Token::Str("a\nb".to_string())]);
    assert_eq!(tokens(r#""a\tb""#), vec![Token::Str("a\tb".to_string())]);
    assert_eq!(tokens(r#""a\\b""#), vec![Token::Str("a\\b".to_string())]);
    assert_eq!(tokens(r#""say \"hi\"""#),
               vec![Token::Str("say \"hi\"".to_string())]);
    assert_eq!(tokens(r#""a\'b""#), vec![Token::Str("a'b".to_string())]);
}

#[test]
fn unknown_string_escapes_are_dropped() {
    assert_eq!(tokens(r#""a\qb""#), vec![Token::Str("ab".to_string())]);
}

#[test]
fn unterminated_strings_end_at_end_of_input() {
    assert_eq!(tokens("\"abc"), vec![Token::Str("abc".to_string())]);
}

#[test]
fn comments_are_skipped() {
    assert_eq!(tokens("1 # the rest is noise ;;;\n2"),
               vec![Token::Number(1.0), Token::Number(2.0)]);
    // A comment at end of input has no closing newline.
    assert_eq!(tokens("1 # trailing"), vec![Token::Number(1.0)]);
}

#[test]
fn unmatched_bytes_become_illegal_tokens() {
    assert_eq!(tokens("@"), vec![Token::Illegal("@".to_string())]);
}

#[test]
fn lines_are_tracked() {
    let lines: Vec<usize> = lex("a\nb\n\nc").into_iter().map(|(_, line)| line).collect();
    assert_eq!(lines, vec![1, 2, 4]);
}

#[test]
fn newlines_inside_strings_count_for_line_tracking() {
    let tokens = lex("\"a\nb\" c");
    assert_eq!(tokens[0].0, Token::Str("a\nb".to_string()));
    assert_eq!(tokens[1], (Token::Identifier("c".to_string()), 2));
}
