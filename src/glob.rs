//! Glob patterns over artifact paths
//!
//! Paths are relative to the artifacts directory and always use `/`.
//! Supported syntax:
//! - `*` any run of characters inside one segment
//! - `**` as a whole segment: zero or more segments
//! - `**` inside a segment: same as `*` (`IPool.sol/**.json`)
//! - `?` one character inside a segment
//! - `{a,b}` alternation, no `/` inside the braces
//!
//! A pattern matches at any depth (`IPool.sol/IPool.json` also selects
//! `base/IPool.sol/IPool.json`) unless it starts with `/`, which pins it to
//! the artifacts root. Patterns compile to anchored regexes.

use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlobError {
    #[error("Empty glob pattern")]
    Empty,

    #[error("Unbalanced braces in glob pattern: {0}")]
    UnbalancedBrace(String),

    #[error("Invalid glob pattern {pattern}: {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// One compiled include or exclude pattern
#[derive(Debug, Clone)]
pub struct ArtifactPattern {
    source: String,
    regex: Regex,
}

impl ArtifactPattern {
    pub fn new(pattern: &str) -> Result<Self, GlobError> {
        let trimmed = pattern.trim();
        let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);
        let (trimmed, rooted) = match trimmed.strip_prefix('/') {
            Some(rest) => (rest, true),
            None => (trimmed, false),
        };
        if trimmed.is_empty() {
            return Err(GlobError::Empty);
        }

        let translated = translate(trimmed, rooted)?;
        let regex = Regex::new(&translated).map_err(|source| GlobError::Regex {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

/// Translate a glob into an anchored regex
fn translate(pattern: &str, rooted: bool) -> Result<String, GlobError> {
    let segments: Vec<&str> = pattern.split('/').collect();
    let mut out = String::from("^");
    if !rooted && segments[0] != "**" {
        out.push_str("(?:[^/]+/)*");
    }

    for (i, segment) in segments.iter().enumerate() {
        let last = i + 1 == segments.len();

        if *segment == "**" {
            if last {
                out.push_str(".*");
            } else {
                out.push_str("(?:[^/]+/)*");
            }
            continue;
        }

        translate_segment(segment, pattern, &mut out)?;
        if !last {
            out.push('/');
        }
    }

    out.push('$');
    Ok(out)
}

fn translate_segment(segment: &str, pattern: &str, out: &mut String) -> Result<(), GlobError> {
    let mut depth = 0usize;
    let mut chars = segment.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '*' => {
                // A run of stars inside a segment is a single wildcard
                while chars.peek() == Some(&'*') {
                    chars.next();
                }
                out.push_str("[^/]*");
            }
            '?' => out.push_str("[^/]"),
            '{' => {
                depth += 1;
                out.push_str("(?:");
            }
            '}' => {
                if depth == 0 {
                    return Err(GlobError::UnbalancedBrace(pattern.to_string()));
                }
                depth -= 1;
                out.push(')');
            }
            ',' if depth > 0 => out.push('|'),
            other => out.push_str(&regex::escape(other.encode_utf8(&mut [0u8; 4]))),
        }
    }

    if depth != 0 {
        return Err(GlobError::UnbalancedBrace(pattern.to_string()));
    }
    Ok(())
}

/// Include and exclude patterns for one target
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    include: Vec<ArtifactPattern>,
    exclude: Vec<ArtifactPattern>,
}

impl PatternSet {
    pub fn new<I, E, S, T>(include: I, exclude: E) -> Result<Self, GlobError>
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let include = include
            .into_iter()
            .map(|p| ArtifactPattern::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        let exclude = exclude
            .into_iter()
            .map(|p| ArtifactPattern::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { include, exclude })
    }

    /// Included by at least one pattern and excluded by none
    pub fn is_selected(&self, path: &str) -> bool {
        self.include.iter().any(|p| p.matches(path)) && !self.is_excluded(path)
    }

    fn is_excluded(&self, path: &str) -> bool {
        self.exclude.iter().any(|p| p.matches(path))
    }

    /// Include patterns as written, for log lines
    pub fn describe_include(&self) -> String {
        self.include
            .iter()
            .map(ArtifactPattern::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}
