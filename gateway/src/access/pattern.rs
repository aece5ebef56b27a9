//! Path patterns for access rules.
//!
//! A pattern is written as a rooted path such as `/arts/{id}` or
//! `/interactions/**` and is parsed once into a sequence of typed segments.
//!
//! # Invariants
//! - A parsed pattern never contains an empty segment.
//! - `**` only ever appears as the final segment.
//! - Matching is purely segment-wise; no regular expressions are involved.

use std::fmt;

/// One segment of a parsed path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches a path segment with exactly this content.
    Literal(String),
    /// Matches exactly one non-empty path segment. Written `{name}`.
    Placeholder(String),
    /// Matches zero or more remaining path segments. Written `**`.
    TrailingWildcard,
}

/// Error returned when a path pattern cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern is the empty string.
    Empty,
    /// The pattern does not start with `/`.
    NotRooted,
    /// The pattern contains an empty segment (`//` or a trailing `/`).
    EmptySegment,
    /// `**` appears somewhere other than the final segment.
    MisplacedWildcard,
    /// A segment contains `*` but is not exactly `**`.
    InvalidWildcard(String),
    /// A segment uses braces but is not a well-formed `{name}` placeholder.
    InvalidPlaceholder(String),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "pattern must not be empty"),
            Self::NotRooted => write!(f, "pattern must start with '/'"),
            Self::EmptySegment => write!(f, "pattern must not contain empty segments"),
            Self::MisplacedWildcard => write!(f, "'**' is only allowed as the final segment"),
            Self::InvalidWildcard(segment) => {
                write!(f, "invalid wildcard segment '{segment}' (only '**' is supported)")
            }
            Self::InvalidPlaceholder(segment) => {
                write!(f, "invalid placeholder segment '{segment}' (expected '{{name}}')")
            }
        }
    }
}

impl std::error::Error for PatternError {}

/// A parsed, validated path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parse a pattern such as `/arts/{id}` or `/swagger-ui/**`.
    ///
    /// `/` parses to a pattern with no segments, which only matches the root path.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        if pattern.is_empty() {
            return Err(PatternError::Empty);
        }
        let rest = pattern.strip_prefix('/').ok_or(PatternError::NotRooted)?;
        if rest.is_empty() {
            return Ok(Self {
                segments: Vec::new(),
            });
        }

        let raw: Vec<&str> = rest.split('/').collect();
        let last = raw.len() - 1;
        let mut segments = Vec::with_capacity(raw.len());
        for (index, segment) in raw.into_iter().enumerate() {
            segments.push(parse_segment(segment, index == last)?);
        }

        Ok(Self { segments })
    }

    /// The pattern matching every path: `/**`.
    #[must_use]
    pub fn any() -> Self {
        Self {
            segments: vec![Segment::TrailingWildcard],
        }
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether this pattern matches every path.
    #[must_use]
    pub fn is_any(&self) -> bool {
        matches!(self.segments.as_slice(), [Segment::TrailingWildcard])
    }

    /// Test a request path against this pattern.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        let mut parts = path_segments(path);
        for segment in &self.segments {
            match segment {
                Segment::TrailingWildcard => return true,
                Segment::Literal(literal) => match parts.next() {
                    Some(part) if part == literal => {}
                    _ => return false,
                },
                Segment::Placeholder(_) => match parts.next() {
                    Some(part) if !part.is_empty() => {}
                    _ => return false,
                },
            }
        }
        parts.next().is_none()
    }

    /// Whether every path matched by `other` is also matched by `self`.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        let mut theirs = other.segments.iter();
        for ours in &self.segments {
            match ours {
                Segment::TrailingWildcard => return true,
                Segment::Literal(literal) => match theirs.next() {
                    Some(Segment::Literal(other_literal)) if other_literal == literal => {}
                    _ => return false,
                },
                Segment::Placeholder(_) => match theirs.next() {
                    Some(Segment::Literal(_) | Segment::Placeholder(_)) => {}
                    _ => return false,
                },
            }
        }
        theirs.next().is_none()
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "/");
        }
        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => write!(f, "/{literal}")?,
                Segment::Placeholder(name) => write!(f, "/{{{name}}}")?,
                Segment::TrailingWildcard => write!(f, "/**")?,
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for PathPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_segment(segment: &str, is_last: bool) -> Result<Segment, PatternError> {
    if segment.is_empty() {
        return Err(PatternError::EmptySegment);
    }
    if segment == "**" {
        return if is_last {
            Ok(Segment::TrailingWildcard)
        } else {
            Err(PatternError::MisplacedWildcard)
        };
    }
    if segment.contains('*') {
        return Err(PatternError::InvalidWildcard(segment.to_string()));
    }
    if segment.contains('{') || segment.contains('}') {
        let name = segment
            .strip_prefix('{')
            .and_then(|s| s.strip_suffix('}'))
            .filter(|name| !name.is_empty() && !name.contains(['{', '}']))
            .ok_or_else(|| PatternError::InvalidPlaceholder(segment.to_string()))?;
        return Ok(Segment::Placeholder(name.to_string()));
    }
    Ok(Segment::Literal(segment.to_string()))
}

/// Split a request path into segments.
///
/// The leading `/` is dropped and `/` itself yields no segments. Empty
/// segments are kept so that `/arts/` and `/arts` stay distinct.
fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    let rest = path.strip_prefix('/').unwrap_or(path);
    (!rest.is_empty()).then(|| rest.split('/')).into_iter().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(s: &str) -> PathPattern {
        PathPattern::parse(s).expect("valid pattern")
    }

    #[test]
    fn test_parse_literal_segments() {
        let p = pattern("/arts/public");
        assert_eq!(
            p.segments(),
            &[
                Segment::Literal("arts".to_string()),
                Segment::Literal("public".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_placeholder_and_wildcard() {
        assert_eq!(
            pattern("/arts/{id}").segments()[1],
            Segment::Placeholder("id".to_string())
        );
        assert_eq!(
            pattern("/interactions/**").segments()[1],
            Segment::TrailingWildcard
        );
        assert!(pattern("/**").is_any());
        assert!(PathPattern::any().is_any());
    }

    #[test]
    fn test_parse_root() {
        let root = pattern("/");
        assert!(root.segments().is_empty());
        assert!(root.matches("/"));
        assert!(!root.matches("/arts"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(PathPattern::parse(""), Err(PatternError::Empty));
        assert_eq!(PathPattern::parse("arts"), Err(PatternError::NotRooted));
        assert_eq!(PathPattern::parse("/arts//x"), Err(PatternError::EmptySegment));
        assert_eq!(PathPattern::parse("/arts/"), Err(PatternError::EmptySegment));
        assert_eq!(
            PathPattern::parse("/**/arts"),
            Err(PatternError::MisplacedWildcard)
        );
        assert!(matches!(
            PathPattern::parse("/arts/*"),
            Err(PatternError::InvalidWildcard(_))
        ));
        assert!(matches!(
            PathPattern::parse("/arts/{}"),
            Err(PatternError::InvalidPlaceholder(_))
        ));
        assert!(matches!(
            PathPattern::parse("/arts/{id"),
            Err(PatternError::InvalidPlaceholder(_))
        ));
        assert!(matches!(
            PathPattern::parse("/arts/{id}.json"),
            Err(PatternError::InvalidPlaceholder(_))
        ));
    }

    #[test]
    fn test_literal_match_is_exact() {
        let p = pattern("/arts/public");
        assert!(p.matches("/arts/public"));
        assert!(!p.matches("/arts/Public"));
        assert!(!p.matches("/arts"));
        assert!(!p.matches("/arts/public/extra"));
        assert!(!p.matches("/arts/public/"));
    }

    #[test]
    fn test_placeholder_matches_exactly_one_segment() {
        let p = pattern("/arts/{id}");
        assert!(p.matches("/arts/42"));
        assert!(p.matches("/arts/my-artworks"));
        assert!(!p.matches("/arts"));
        assert!(!p.matches("/arts/"));
        assert!(!p.matches("/arts/42/comments"));
    }

    #[test]
    fn test_trailing_wildcard_matches_zero_or_more() {
        let p = pattern("/interactions/**");
        assert!(p.matches("/interactions"));
        assert!(p.matches("/interactions/like/7"));
        assert!(p.matches("/interactions/comment/3/"));
        assert!(!p.matches("/interaction"));
        assert!(!p.matches("/arts/interactions"));

        let any = PathPattern::any();
        assert!(any.matches("/"));
        assert!(any.matches("/anything/at/all"));
    }

    #[test]
    fn test_covers() {
        assert!(pattern("/**").covers(&pattern("/arts/{id}")));
        assert!(pattern("/arts/**").covers(&pattern("/arts/**")));
        assert!(pattern("/arts/**").covers(&pattern("/arts")));
        assert!(pattern("/arts/{id}").covers(&pattern("/arts/my-artworks")));
        assert!(pattern("/arts/{id}").covers(&pattern("/arts/{other}")));
        assert!(!pattern("/arts/my-artworks").covers(&pattern("/arts/{id}")));
        assert!(!pattern("/arts/{id}").covers(&pattern("/arts/**")));
        assert!(!pattern("/arts/{id}").covers(&pattern("/arts/1/comments")));
        assert!(!pattern("/arts").covers(&pattern("/arts/**")));
    }

    #[test]
    fn test_display_round_trips_source() {
        for source in ["/", "/arts/public", "/arts/{id}", "/swagger-ui/**", "/**"] {
            assert_eq!(pattern(source).to_string(), source);
        }
    }
}
