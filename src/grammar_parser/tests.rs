use super::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chumsky::prelude::*;

    fn parse_ok(input: &str) -> Vec<Statement<'_>> {
        let result = rules().parse(input);
        for e in result.errors() {
            println!("Error: {} at {}", e, e.span());
        }
        assert!(!result.has_errors());
        result.into_output().expect("Should have output")
    }

    fn rule_of<'a, 'gr>(statement: &'a Statement<'gr>) -> &'a Rule<'gr> {
        match statement {
            Statement::Rule(rule) => rule,
            other => panic!("Expected rule, got {:?}", other),
        }
    }

    #[test]
    fn test_binary_rule() {
        let statements = parse_ok("S -> A B");
        assert_eq!(statements.len(), 1);

        let rule = rule_of(&statements[0]);
        assert_eq!(rule.lhs, "S");
        assert_eq!(rule.alternatives.len(), 1);

        let alt = &rule.alternatives[0];
        assert_eq!(alt.len(), 2);
        if let (Symbol::NonTerminal(b), Symbol::NonTerminal(c)) = (&alt[0], &alt[1]) {
            assert_eq!(*b, "A");
            assert_eq!(*c, "B");
        } else {
            panic!("Expected two nonterminals");
        }
    }

    #[test]
    fn test_terminal_alternatives() {
        let statements = parse_ok(r#"Prep -> "ring" | "ka" | "saking""#);
        let rule = rule_of(&statements[0]);
        assert_eq!(rule.lhs, "Prep");

        let terminals: Vec<&str> = rule
            .alternatives
            .iter()
            .map(|alt| match &alt[..] {
                [Symbol::Terminal(t)] => t.text,
                other => panic!("Expected single terminal, got {:?}", other),
            })
            .collect();
        assert_eq!(terminals, vec!["ring", "ka", "saking"]);
    }

    #[test]
    fn test_terminal_keeps_inner_spaces_and_unicode() {
        let statements = parse_ok(r#"N -> "punyan kayuné" | "balé banjar""#);
        let rule = rule_of(&statements[0]);
        if let Symbol::Terminal(t) = &rule.alternatives[0][0] {
            assert_eq!(*t, "punyan kayuné");
        } else {
            panic!("Expected terminal");
        }
        if let Symbol::Terminal(t) = &rule.alternatives[1][0] {
            assert_eq!(*t, "balé banjar");
        } else {
            panic!("Expected terminal");
        }
    }

    #[test]
    fn test_terminal_span_excludes_quotes() {
        let input = r#"A -> "xy""#;
        let statements = parse_ok(input);
        let rule = rule_of(&statements[0]);
        if let Symbol::Terminal(t) = &rule.alternatives[0][0] {
            assert_eq!(&input[t.span.start..t.span.end], "xy");
        } else {
            panic!("Expected terminal");
        }
    }

    #[test]
    fn test_unit_rule() {
        let statements = parse_ok("NP -> N | PropN");
        let rule = rule_of(&statements[0]);
        assert_eq!(rule.alternatives.len(), 2);
        assert!(rule.alternatives.iter().all(|alt| alt.len() == 1));
    }

    #[test]
    fn test_start_declaration() {
        let statements = parse_ok("start: S\nS -> A A\nA -> \"a\"");
        assert_eq!(statements.len(), 3);
        if let Statement::Start(sym) = &statements[0] {
            assert_eq!(*sym, "S");
        } else {
            panic!("Expected start declaration");
        }
    }

    #[test]
    fn test_start_prefixed_name_is_a_rule() {
        let statements = parse_ok("startX -> A B\nstart -> A B");
        assert_eq!(rule_of(&statements[0]).lhs, "startX");
        assert_eq!(rule_of(&statements[1]).lhs, "start");
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let input = r#"
# sentence level
S -> NP VP   # subject first

   # lexicon
NP -> "dog"
VP -> "runs"
# trailing comment without newline"#;
        let statements = parse_ok(input);
        assert_eq!(statements.len(), 3);
        assert_eq!(rule_of(&statements[0]).lhs, "S");
        assert_eq!(rule_of(&statements[2]).lhs, "VP");
    }

    #[test]
    fn test_semicolon_separator() {
        let statements = parse_ok(r#"S -> A B; A -> "a"; B -> "b""#);
        assert_eq!(statements.len(), 3);
    }

    #[test]
    fn test_whitespace_handling() {
        let statements = parse_ok("   S   ->   A    B   |   C   \n\n\n  C  ->  \"c\"  \n");
        assert_eq!(statements.len(), 2);
        let rule = rule_of(&statements[0]);
        assert_eq!(rule.alternatives.len(), 2);
        assert_eq!(rule.alternatives[0].len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_ok("").is_empty());
        assert!(parse_ok("\n\n# nothing here\n").is_empty());
    }

    #[test]
    fn test_non_cnf_shapes_still_parse() {
        // shape checking happens when converting to a grammar
        let statements = parse_ok(r#"S -> A B C | "x" Y"#);
        let rule = rule_of(&statements[0]);
        assert_eq!(rule.alternatives[0].len(), 3);
        assert_eq!(rule.alternatives[1].len(), 2);
    }
}
