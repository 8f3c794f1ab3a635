//! Compound attribute selectors.
//!
//! Grammar: a comma-separated list of compound selectors, each an optional tag
//! (or `*`) followed by any mix of `[attr]`, `[attr<op>value<flag>]`, `.class`,
//! `#id` and `:not(<compound>)`. Operators: `=`, `*=`, `^=`, `$=`, `~=`, `|=`.
//! The ` i` flag makes the value comparison ASCII case-insensitive.
//! Combinators and every other pseudo-class are rejected.

use notehide_core::errors::SelectorError;

/// Attribute comparison operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrOp {
    Exists,
    Equals(String),
    Contains(String),
    Prefix(String),
    Suffix(String),
    /// Whitespace-separated word match.
    Includes(String),
    /// Exact match or `value-` prefix.
    DashMatch(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    pub name: String,
    pub op: AttrOp,
    pub case_insensitive: bool,
}

impl AttributeSelector {
    fn matches(&self, attributes: &[(String, String)]) -> bool {
        let Some((_, actual)) = attributes.iter().find(|(name, _)| *name == self.name) else {
            return false;
        };
        let (actual, expected) = match &self.op {
            AttrOp::Exists => return true,
            AttrOp::Equals(v)
            | AttrOp::Contains(v)
            | AttrOp::Prefix(v)
            | AttrOp::Suffix(v)
            | AttrOp::Includes(v)
            | AttrOp::DashMatch(v) => {
                if self.case_insensitive {
                    (actual.to_ascii_lowercase(), v.to_ascii_lowercase())
                } else {
                    (actual.clone(), v.clone())
                }
            }
        };
        match &self.op {
            AttrOp::Exists => true,
            AttrOp::Equals(_) => actual == expected,
            // Empty substring/prefix/suffix values never match.
            AttrOp::Contains(_) => !expected.is_empty() && actual.contains(&expected),
            AttrOp::Prefix(_) => !expected.is_empty() && actual.starts_with(&expected),
            AttrOp::Suffix(_) => !expected.is_empty() && actual.ends_with(&expected),
            AttrOp::Includes(_) => actual.split_whitespace().any(|w| w == expected),
            AttrOp::DashMatch(_) => {
                actual == expected || actual.starts_with(&format!("{expected}-"))
            }
        }
    }
}

/// One compound selector: tag, attribute tests and negations, all of which must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    pub tag: Option<String>,
    pub attributes: Vec<AttributeSelector>,
    pub negations: Vec<CompoundSelector>,
}

impl CompoundSelector {
    pub fn matches(&self, tag: &str, attributes: &[(String, String)]) -> bool {
        if let Some(expected) = &self.tag {
            if !expected.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        self.attributes.iter().all(|a| a.matches(attributes))
            && !self.negations.iter().any(|n| n.matches(tag, attributes))
    }
}

/// A parsed selector list. Matches when any member matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<CompoundSelector>,
}

impl SelectorList {
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        Parser::new(source).parse_list()
    }

    pub fn matches(&self, tag: &str, attributes: &[(String, String)]) -> bool {
        self.selectors.iter().any(|s| s.matches(tag, attributes))
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn parse_list(&mut self) -> Result<SelectorList, SelectorError> {
        let mut selectors = Vec::new();
        loop {
            self.skip_ws();
            selectors.push(self.parse_compound()?);
            let skipped = self.skip_ws();
            match self.peek() {
                None => break,
                Some(',') => {
                    self.pos += 1;
                }
                Some('>' | '+' | '~') => return Err(self.unsupported("combinator")),
                Some(c) if skipped && starts_compound(c) => {
                    return Err(self.unsupported("descendant combinator"))
                }
                Some(c) => return Err(self.unexpected(c)),
            }
        }
        Ok(SelectorList { selectors })
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let start = self.pos;
        let mut compound = CompoundSelector::default();

        match self.peek() {
            Some('*') => self.pos += 1,
            Some(c) if is_ident_char(c) => {
                compound.tag = Some(self.parse_ident()?.to_ascii_lowercase());
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('[') => compound.attributes.push(self.parse_attribute()?),
                Some('.') => {
                    self.pos += 1;
                    let class = self.parse_ident()?;
                    compound.attributes.push(AttributeSelector {
                        name: "class".to_string(),
                        op: AttrOp::Includes(class),
                        case_insensitive: false,
                    });
                }
                Some('#') => {
                    self.pos += 1;
                    let id = self.parse_ident()?;
                    compound.attributes.push(AttributeSelector {
                        name: "id".to_string(),
                        op: AttrOp::Equals(id),
                        case_insensitive: false,
                    });
                }
                Some(':') => compound.negations.push(self.parse_negation()?),
                _ => break,
            }
        }

        if self.pos == start {
            return match self.peek() {
                None => Err(SelectorError::Empty),
                Some(c) => Err(self.unexpected(c)),
            };
        }
        Ok(compound)
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        self.expect('[', "attribute selector")?;
        self.skip_ws();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_ws();

        let op_kind = match self.peek() {
            Some(']') => {
                self.pos += 1;
                return Ok(AttributeSelector {
                    name,
                    op: AttrOp::Exists,
                    case_insensitive: false,
                });
            }
            Some('=') => {
                self.pos += 1;
                '='
            }
            Some(c @ ('*' | '^' | '$' | '~' | '|')) => {
                self.pos += 1;
                self.expect('=', "attribute selector")?;
                c
            }
            Some(c) => return Err(self.unexpected(c)),
            None => return Err(self.unterminated("attribute selector")),
        };

        self.skip_ws();
        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => self.parse_quoted(quote)?,
            Some(_) => self.parse_ident()?,
            None => return Err(self.unterminated("attribute selector")),
        };
        self.skip_ws();

        let mut case_insensitive = false;
        match self.peek() {
            Some('i' | 'I') => {
                case_insensitive = true;
                self.pos += 1;
            }
            Some('s' | 'S') => self.pos += 1,
            _ => {}
        }
        self.skip_ws();
        self.expect(']', "attribute selector")?;

        let op = match op_kind {
            '=' => AttrOp::Equals(value),
            '*' => AttrOp::Contains(value),
            '^' => AttrOp::Prefix(value),
            '$' => AttrOp::Suffix(value),
            '~' => AttrOp::Includes(value),
            _ => AttrOp::DashMatch(value),
        };
        Ok(AttributeSelector {
            name,
            op,
            case_insensitive,
        })
    }

    fn parse_negation(&mut self) -> Result<CompoundSelector, SelectorError> {
        self.expect(':', "pseudo-class")?;
        let name = self.parse_ident()?;
        if !name.eq_ignore_ascii_case("not") {
            return Err(self.unsupported(&format!(":{name}")));
        }
        self.expect('(', ":not()")?;
        self.skip_ws();
        let inner = self.parse_compound()?;
        self.skip_ws();
        self.expect(')', ":not()")?;
        Ok(inner)
    }

    fn parse_ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return match self.peek() {
                Some(c) => Err(self.unexpected(c)),
                None => Err(self.unterminated("identifier")),
            };
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn parse_quoted(&mut self, quote: char) -> Result<String, SelectorError> {
        self.pos += 1;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == quote {
                let value = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                return Ok(value);
            }
            self.pos += 1;
        }
        Err(self.unterminated("string"))
    }

    fn expect(&mut self, expected: char, what: &'static str) -> Result<(), SelectorError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(self.unexpected(c)),
            None => Err(self.unterminated(what)),
        }
    }

    /// Returns true when any whitespace was consumed.
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn unexpected(&self, found: char) -> SelectorError {
        SelectorError::UnexpectedChar {
            selector: self.source.to_string(),
            offset: self.pos,
            found,
        }
    }

    fn unterminated(&self, what: &'static str) -> SelectorError {
        SelectorError::Unterminated {
            selector: self.source.to_string(),
            what,
        }
    }

    fn unsupported(&self, feature: &str) -> SelectorError {
        SelectorError::Unsupported {
            selector: self.source.to_string(),
            feature: feature.to_string(),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn starts_compound(c: char) -> bool {
    is_ident_char(c) || matches!(c, '*' | '[' | '.' | '#' | ':')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_tag_with_attribute() {
        let list = SelectorList::parse(r#"article[data-testid="tweet"]"#).unwrap();
        assert_eq!(list.selectors.len(), 1);
        assert_eq!(list.selectors[0].tag.as_deref(), Some("article"));
        assert!(list.matches("article", &attrs(&[("data-testid", "tweet")])));
        assert!(!list.matches("div", &attrs(&[("data-testid", "tweet")])));
    }

    #[test]
    fn case_insensitive_flag() {
        let list = SelectorList::parse(r#"[data-testid*="communityNote" i]"#).unwrap();
        assert!(list.matches("div", &attrs(&[("data-testid", "birdwatch-COMMUNITYNOTE")])));
        let strict = SelectorList::parse(r#"[data-testid*="communityNote"]"#).unwrap();
        assert!(!strict.matches("div", &attrs(&[("data-testid", "communitynote")])));
    }

    #[test]
    fn negation_excludes_marked_items() {
        let list =
            SelectorList::parse(r#"article[data-testid="tweet"]:not([data-note-checked])"#)
                .unwrap();
        assert!(list.matches("article", &attrs(&[("data-testid", "tweet")])));
        assert!(!list.matches(
            "article",
            &attrs(&[("data-testid", "tweet"), ("data-note-checked", "true")])
        ));
    }

    #[test]
    fn selector_list_matches_any_member() {
        let list = SelectorList::parse(r#"svg[aria-label], [role="img"][aria-label]"#).unwrap();
        assert_eq!(list.selectors.len(), 2);
        assert!(list.matches("span", &attrs(&[("role", "img"), ("aria-label", "x")])));
        assert!(list.matches("svg", &attrs(&[("aria-label", "x")])));
        assert!(!list.matches("span", &attrs(&[("aria-label", "x")])));
    }

    #[test]
    fn operators() {
        let a = attrs(&[("href", "/i/communitynotes/t/1"), ("class", "r-1 note-x")]);
        assert!(SelectorList::parse("[href^='/i/']").unwrap().matches("a", &a));
        assert!(SelectorList::parse("[href$='/1']").unwrap().matches("a", &a));
        assert!(SelectorList::parse(".note-x").unwrap().matches("a", &a));
        assert!(!SelectorList::parse(".note").unwrap().matches("a", &a));
        assert!(SelectorList::parse("[class|=r]").unwrap().matches("a", &attrs(&[("class", "r-1")])));
        assert!(!SelectorList::parse(r#"[href*=""]"#).unwrap().matches("a", &a));
    }

    #[test]
    fn rejects_combinators() {
        assert!(matches!(
            SelectorList::parse("article > div"),
            Err(SelectorError::Unsupported { .. })
        ));
        assert!(matches!(
            SelectorList::parse("article div"),
            Err(SelectorError::Unsupported { .. })
        ));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(SelectorList::parse(""), Err(SelectorError::Empty));
        assert_eq!(SelectorList::parse("a,"), Err(SelectorError::Empty));
        assert!(matches!(
            SelectorList::parse("[data-testid"),
            Err(SelectorError::Unterminated { .. })
        ));
        assert!(matches!(
            SelectorList::parse(r#"[aria-label*="note]"#),
            Err(SelectorError::Unterminated { what: "string", .. })
        ));
        assert!(matches!(
            SelectorList::parse(":has(a)"),
            Err(SelectorError::Unsupported { .. })
        ));
        assert!(matches!(
            SelectorList::parse("[a!=b]"),
            Err(SelectorError::UnexpectedChar { found: '!', .. })
        ));
    }
}
