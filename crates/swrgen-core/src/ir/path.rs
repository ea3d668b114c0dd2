use std::fmt;

/// A parsed route path such as `/2010-04-01/Accounts/{Sid}.json`.
///
/// Segments are split on `/`. Inside a segment, `{name}` marks a parameter, and a
/// segment starting with `:` is a parameter that runs up to the next `.`, `-`, or the
/// end of the segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    pub segments: Vec<PathSegment>,
}

/// One `/`-delimited segment, made of literal text and parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub parts: Vec<PathPart>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPart {
    Literal(String), // e.g. "Accounts" in /Accounts/{Sid}.json
    Param(String),   // e.g. "Sid" in /Accounts/{Sid}.json
}

impl PathTemplate {
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(parse_segment)
            .collect();
        Self { segments }
    }

    /// Parameter names in order of appearance.
    pub fn param_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .flat_map(|s| s.parts.iter())
            .filter_map(|p| match p {
                PathPart::Param(name) => Some(name.as_str()),
                PathPart::Literal(_) => None,
            })
            .collect()
    }

    /// Render with every parameter as `:name`, the form used in cache and mutation keys.
    pub fn to_colon_form(&self) -> String {
        self.render(|name| format!(":{name}"))
    }

    /// Render with every parameter as `{name}`, the OpenAPI form.
    pub fn to_brace_form(&self) -> String {
        self.render(|name| format!("{{{name}}}"))
    }

    fn render(&self, param: impl Fn(&str) -> String) -> String {
        if self.segments.is_empty() {
            return "/".to_string();
        }
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            for part in &segment.parts {
                match part {
                    PathPart::Literal(text) => out.push_str(text),
                    PathPart::Param(name) => out.push_str(&param(name)),
                }
            }
        }
        out
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_brace_form())
    }
}

fn parse_segment(raw: &str) -> PathSegment {
    if let Some(rest) = raw.strip_prefix(':') {
        let end = rest.find(['.', '-']).unwrap_or(rest.len());
        let mut parts = vec![PathPart::Param(rest[..end].to_string())];
        if end < rest.len() {
            parts.push(PathPart::Literal(rest[end..].to_string()));
        }
        return PathSegment { parts };
    }

    let mut parts = Vec::new();
    let mut rest = raw;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|i| open + i) else {
            break;
        };
        if open > 0 {
            parts.push(PathPart::Literal(rest[..open].to_string()));
        }
        parts.push(PathPart::Param(rest[open + 1..close].to_string()));
        rest = &rest[close + 1..];
    }
    if !rest.is_empty() {
        parts.push(PathPart::Literal(rest.to_string()));
    }
    PathSegment { parts }
}
