/// Splits a declaration file into entries: one per line, trimmed, order
/// preserved. Blank lines are kept as empty entries so callers can tell a
/// file with no lines from one holding only blank lines.
pub fn parse_declaration(content: &str) -> Vec<String> {
    content.lines().map(|line| line.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declaration() {
        let entries = parse_declaration("alice\n  bob  \r\n\ncarol");
        assert_eq!(entries, vec!["alice", "bob", "", "carol"]);
    }

    #[test]
    fn test_parse_keeps_hash_lines_as_entries() {
        assert_eq!(parse_declaration("# not a comment\n"), vec!["# not a comment"]);
    }

    #[test]
    fn test_parse_blank_lines_and_empty_file() {
        assert_eq!(parse_declaration("\n \n\t\n"), vec!["", "", ""]);
        assert_eq!(parse_declaration("\n"), vec![""]);
        assert!(parse_declaration("").is_empty());
    }
}
