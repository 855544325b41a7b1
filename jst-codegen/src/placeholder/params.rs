//! Parameter and column definitions as written in templates.

/// A single `@name TYPE [= default]` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDef {
    pub name: String,
    /// Type as written, without trailing OUTPUT/READONLY keywords
    pub data_type: String,
    /// Default value as written
    pub default: Option<String>,
}

const TRAILING_KEYWORDS: [&str; 3] = ["OUTPUT", "OUT", "READONLY"];

impl ParamDef {
    /// Parse a definition such as `@id INT = 5` or `@plate AS NVARCHAR(20) OUTPUT`.
    ///
    /// Returns `None` when the definition has no name.
    pub fn parse(definition: &str) -> Option<Self> {
        let definition = definition.trim().trim_end_matches(',').trim();
        let (declaration, default) = match find_top_level(definition, '=') {
            Some(index) => (
                &definition[..index],
                Some(definition[index + 1..].trim().to_string()),
            ),
            None => (definition, None),
        };

        let declaration = declaration.trim();
        let (name, rest) = match declaration.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (declaration, ""),
        };
        if name.is_empty() {
            return None;
        }

        let mut data_type = strip_keyword_prefix(rest, "AS").unwrap_or(rest).trim();
        while let Some(stripped) = TRAILING_KEYWORDS
            .iter()
            .find_map(|keyword| strip_keyword_suffix(data_type, keyword))
        {
            data_type = stripped.trim_end();
        }

        Some(Self {
            name: name.to_string(),
            data_type: data_type.to_string(),
            default: default.filter(|d| !d.is_empty()),
        })
    }

    /// `name type`, as used in a variable declaration.
    pub fn definition(&self) -> String {
        if self.data_type.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.name, self.data_type)
        }
    }
}

/// Split a parameter list on top-level commas.
///
/// Commas inside parentheses (`DECIMAL(10, 2)`) or quotes are kept, and
/// `--` line comments are dropped. Empty entries are skipped.
pub fn split_definitions(text: &str) -> Vec<String> {
    let mut definitions = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) => {
                current.push(c);
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                '\'' | '"' | '[' => {
                    quote = Some(if c == '[' { ']' } else { c });
                    current.push(c);
                }
                '-' if chars.peek() == Some(&'-') => {
                    for skipped in chars.by_ref() {
                        if skipped == '\n' {
                            current.push('\n');
                            break;
                        }
                    }
                }
                '(' => {
                    depth += 1;
                    current.push(c);
                }
                ')' => {
                    depth = depth.saturating_sub(1);
                    current.push(c);
                }
                ',' if depth == 0 => {
                    push_definition(&mut definitions, &current);
                    current.clear();
                }
                _ => current.push(c),
            },
        }
    }
    push_definition(&mut definitions, &current);

    definitions
}

fn push_definition(definitions: &mut Vec<String>, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        definitions.push(text.to_string());
    }
}

/// Index of the first `needle` outside parentheses and quotes.
fn find_top_level(text: &str, needle: char) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (index, c) in text.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' => quote = Some(c),
                '[' => quote = Some(']'),
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                c if c == needle && depth == 0 => return Some(index),
                _ => {}
            },
        }
    }
    None
}

fn strip_keyword_prefix<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let head = text.get(..keyword.len())?;
    let rest = &text[keyword.len()..];
    (head.eq_ignore_ascii_case(keyword) && rest.starts_with(char::is_whitespace)).then_some(rest)
}

fn strip_keyword_suffix<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let split = text.len().checked_sub(keyword.len())?;
    let tail = text.get(split..)?;
    let rest = &text[..split];
    (tail.eq_ignore_ascii_case(keyword) && rest.ends_with(char::is_whitespace)).then_some(rest)
}
