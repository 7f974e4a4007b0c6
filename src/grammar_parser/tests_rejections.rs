use chumsky::Parser;

use crate::grammar_parser::rules;

#[cfg(test)]
mod invalid_input_tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::Path;

    fn log_errors(
        test_name: &str,
        input: &str,
        errors: impl IntoIterator<Item = impl std::fmt::Display>,
    ) {
        let folder = Path::new("target/test_errors");
        if !folder.exists() {
            fs::create_dir_all(folder).unwrap();
        }
        let file_path = folder.join(format!("{}.log", test_name));
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "Input:\n{}\n", input).unwrap();
        writeln!(file, "Errors:").unwrap();
        for e in errors {
            writeln!(file, "  - {}", e).unwrap();
        }
        println!("Parse errors logged to {:?}", file_path);
    }

    fn assert_rejected(test_name: &str, input: &str, why: &str) {
        let result = rules().parse(input);
        assert!(result.has_errors(), "Expected parser to fail: {}", why);
        log_errors(test_name, input, result.errors());
    }

    #[test]
    fn test_unclosed_quote() {
        assert_rejected("unclosed_quote", r#"A -> "unclosed"#, "unclosed quote");
    }

    #[test]
    fn test_quote_spanning_lines() {
        assert_rejected("quote_spanning_lines", "A -> \"one\ntwo\"", "newline inside terminal");
    }

    #[test]
    fn test_empty_terminal() {
        assert_rejected("empty_terminal", r#"A -> """#, "empty terminal");
    }

    #[test]
    fn test_missing_arrow() {
        assert_rejected("missing_arrow", "S A B", "missing `->`");
    }

    #[test]
    fn test_missing_rhs() {
        assert_rejected("missing_rhs", "S ->", "no alternatives");
    }

    #[test]
    fn test_empty_alternative() {
        assert_rejected("empty_alternative", "S -> A | | B", "empty alternative");
    }

    #[test]
    fn test_trailing_bar() {
        assert_rejected("trailing_bar", "S -> A B |", "dangling `|`");
    }

    #[test]
    fn test_start_without_symbol() {
        assert_rejected("start_without_symbol", "start:\nS -> A B", "start with no symbol");
    }

    #[test]
    fn test_invalid_identifier() {
        assert_rejected("invalid_identifier", "1S -> A B", "identifier starting with a digit");
    }

    #[test]
    fn test_two_rules_on_one_line() {
        assert_rejected("two_rules_one_line", "S -> A B C -> D", "second arrow on the same line");
    }
}
