//! Identifier quoting.

use crate::dialect::Dialect;

/// Wraps table and column identifiers in a dialect's quote character.
///
/// Quoting is textual: the only escaping performed is doubling an
/// embedded quote character. Dotted identifiers are quoted segment by
/// segment, so `users.name` becomes `"users"."name"`. A segment that is
/// already quoted is kept as written, and a bare `*` stays unquoted.
///
/// ```rust
/// use score_sql_core::Quoter;
///
/// let quoter = Quoter::new('"');
/// assert_eq!(quoter.quote("\"my table\".name"), "\"my table\".\"name\"");
/// assert_eq!(Quoter::new('`').quote("u.*"), "`u`.*");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quoter {
    quote_char: char,
}

impl Quoter {
    /// Creates a quoter for the given quote character.
    #[must_use]
    pub const fn new(quote_char: char) -> Self {
        Self { quote_char }
    }

    /// Creates the quoter a dialect uses.
    #[must_use]
    pub const fn for_dialect(dialect: Dialect) -> Self {
        Self::new(dialect.identifier_quote())
    }

    /// Returns the quote character.
    #[must_use]
    pub const fn quote_char(&self) -> char {
        self.quote_char
    }

    /// Quotes one identifier, segment by segment.
    #[must_use]
    pub fn quote(&self, identifier: &str) -> String {
        self.segments(identifier)
            .into_iter()
            .map(|segment| self.quote_segment(segment))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Quotes every identifier, keeping their order.
    #[must_use]
    pub fn quote_all<I, S>(&self, identifiers: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        identifiers
            .into_iter()
            .map(|ident| self.quote(ident.as_ref()))
            .collect()
    }

    /// Splits on `.` outside quoted segments.
    fn segments<'a>(&self, identifier: &'a str) -> Vec<&'a str> {
        let mut segments = vec![];
        let mut in_quote = false;
        let mut start = 0;
        for (idx, ch) in identifier.char_indices() {
            if ch == self.quote_char {
                in_quote = !in_quote;
            } else if ch == '.' && !in_quote {
                segments.push(&identifier[start..idx]);
                start = idx + ch.len_utf8();
            }
        }
        segments.push(&identifier[start..]);
        segments
    }

    fn quote_segment(&self, segment: &str) -> String {
        let q = self.quote_char;
        if segment == "*" || self.is_quoted(segment) {
            return String::from(segment);
        }
        let doubled = format!("{q}{q}");
        let escaped = segment.replace(q, &doubled);
        format!("{q}{escaped}{q}")
    }

    /// A segment counts as quoted when it is wrapped in the quote
    /// character and every quote inside is doubled.
    fn is_quoted(&self, segment: &str) -> bool {
        let q = self.quote_char;
        let Some(inner) = segment
            .strip_prefix(q)
            .and_then(|rest| rest.strip_suffix(q))
        else {
            return false;
        };
        let mut chars = inner.chars();
        while let Some(ch) = chars.next() {
            if ch == q && chars.next() != Some(q) {
                return false;
            }
        }
        true
    }
}

impl Default for Quoter {
    fn default() -> Self {
        Self::for_dialect(Dialect::Generic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_simple() {
        let q = Quoter::default();
        assert_eq!(q.quote("my_table"), "\"my_table\"");
        assert_eq!(q.quote("select"), "\"select\"");
    }

    #[test]
    fn test_quote_backtick() {
        let q = Quoter::for_dialect(Dialect::MySql);
        assert_eq!(q.quote("users"), "`users`");
        assert_eq!(q.quote("users.name"), "`users`.`name`");
    }

    #[test]
    fn test_quote_doubles_embedded_quote() {
        let q = Quoter::default();
        assert_eq!(q.quote("table\"name"), "\"table\"\"name\"");
        assert_eq!(Quoter::new('`').quote("a`b"), "`a``b`");
    }

    #[test]
    fn test_quote_dotted_identifier() {
        let q = Quoter::default();
        assert_eq!(q.quote("users.name"), "\"users\".\"name\"");
        assert_eq!(q.quote("public.users.id"), "\"public\".\"users\".\"id\"");
    }

    #[test]
    fn test_quote_keeps_quoted_segment() {
        let q = Quoter::default();
        assert_eq!(q.quote("\"my table\".name"), "\"my table\".\"name\"");
        assert_eq!(q.quote("\"a.b\""), "\"a.b\"");
    }

    #[test]
    fn test_quote_escapes_unbalanced_quoted_segment() {
        let q = Quoter::default();
        assert_eq!(
            q.quote("\"x\" OR 1=1 --\""),
            "\"\"\"x\"\" OR 1=1 --\"\"\""
        );
        assert_eq!(q.quote("\"my \"\"t\"\"\""), "\"my \"\"t\"\"\"");
        assert_eq!(q.quote("\""), "\"\"\"\"");
        assert_eq!(Quoter::new('`').quote("`a` OR `b`"), "```a`` OR ``b```");
    }

    #[test]
    fn test_quote_star_segment() {
        let q = Quoter::default();
        assert_eq!(q.quote("u.*"), "\"u\".*");
        assert_eq!(q.quote("*"), "*");
    }

    #[test]
    fn test_quote_empty() {
        assert_eq!(Quoter::default().quote(""), "\"\"");
    }

    #[test]
    fn test_quote_all_keeps_order() {
        let q = Quoter::default();
        assert_eq!(
            q.quote_all(["b", "a", "c"]),
            vec!["\"b\"", "\"a\"", "\"c\""]
        );
    }
}
