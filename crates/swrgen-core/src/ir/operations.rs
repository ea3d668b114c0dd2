use super::path::PathTemplate;
use super::schemas::IrType;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
        }
    }

    /// Lowercase form, used as identifier prefix and as the key in a path item.
    pub fn as_lower(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Trace => "trace",
        }
    }
}

/// The identifier a route is emitted under, e.g. `get20100401AccountsJson`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteName {
    pub function: String,
}

impl RouteName {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
        }
    }

    pub fn pascal(&self) -> String {
        let mut chars = self.function.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// `use{Pascal}`, the query or mutation hook.
    pub fn hook(&self) -> String {
        format!("use{}", self.pascal())
    }

    /// `get{Pascal}Key`, the cache-key builder paired with a query hook.
    pub fn key_function(&self) -> String {
        format!("get{}Key", self.pascal())
    }

    pub fn args_type(&self) -> String {
        format!("{}Args", self.pascal())
    }

    pub fn response_type(&self) -> String {
        format!("{}Response", self.pascal())
    }
}

/// A route descriptor: one HTTP method on one path.
#[derive(Debug, Clone)]
pub struct IrOperation {
    pub name: RouteName,
    pub method: HttpMethod,
    pub path: String,
    pub template: PathTemplate,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub parameters: Vec<IrParameter>,
    pub request_body: Option<IrRequestBody>,
    pub responses: Vec<IrResponse>,
    pub deprecated: bool,
}

impl IrOperation {
    /// GET routes get a query hook and cache-key function; everything else a mutation hook.
    pub fn is_query(&self) -> bool {
        self.method == HttpMethod::Get
    }

    /// The path with parameters written as `:name`.
    pub fn key_path(&self) -> String {
        self.template.to_colon_form()
    }

    /// The fixed key string a mutation hook is bound to, e.g. `POST /Accounts/:Sid.json`.
    pub fn mutation_key(&self) -> String {
        format!("{} {}", self.method.as_str(), self.key_path())
    }

    /// Every top-level name emitted for this route, across all generated modules.
    pub fn declared_names(&self) -> Vec<String> {
        let mut names = vec![self.name.function.clone(), self.name.hook()];
        if self.is_query() {
            names.push(self.name.key_function());
        }
        names.push(self.name.args_type());
        names.push(self.name.response_type());
        names
    }

    /// `METHOD path` as written in the schema, used in diagnostics.
    pub fn route(&self) -> String {
        format!("{} {}", self.method.as_str(), self.path)
    }

    /// Responses whose payload is returned to the caller: every 2xx response, or
    /// `default` when the route declares no 2xx response.
    pub fn success_responses(&self) -> Vec<&IrResponse> {
        let success: Vec<&IrResponse> =
            self.responses.iter().filter(|r| r.is_success()).collect();
        if !success.is_empty() {
            return success;
        }
        self.responses
            .iter()
            .filter(|r| r.status == "default")
            .collect()
    }

    /// Distinct success payload types in declaration order. Empty for bodiless routes.
    pub fn success_types(&self) -> Vec<IrType> {
        let mut types: Vec<IrType> = Vec::new();
        for resp in self.success_responses() {
            if resp.response_type == IrType::Void {
                continue;
            }
            if !types.contains(&resp.response_type) {
                types.push(resp.response_type.clone());
            }
        }
        types
    }

    /// One-line description for doc comments. The description is dropped when it
    /// repeats the summary.
    pub fn doc_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(ref summary) = self.summary {
            lines.extend(summary.lines().map(|l| l.trim_end().to_string()));
        }
        if let Some(ref description) = self.description {
            let repeats = self
                .summary
                .as_ref()
                .is_some_and(|s| s.trim() == description.trim());
            if !repeats {
                if !lines.is_empty() {
                    lines.push(String::new());
                }
                lines.extend(description.lines().map(|l| l.trim_end().to_string()));
            }
        }
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        lines
    }

    pub fn params_in(&self, location: IrParameterLocation) -> impl Iterator<Item = &IrParameter> {
        self.parameters
            .iter()
            .filter(move |p| p.location == location)
    }
}

/// A declared response.
#[derive(Debug, Clone, PartialEq)]
pub struct IrResponse {
    /// Status code as written: `200`, `2XX`, `default`.
    pub status: String,
    pub content_type: Option<String>,
    /// `IrType::Void` when the response has no content.
    pub response_type: IrType,
    pub description: Option<String>,
}

impl IrResponse {
    pub fn is_success(&self) -> bool {
        self.status.starts_with('2')
    }
}

/// A resolved path/query/header/cookie parameter.
#[derive(Debug, Clone)]
pub struct IrParameter {
    pub original_name: String,
    pub location: IrParameterLocation,
    pub param_type: IrType,
    pub required: bool,
    pub description: Option<String>,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrParameterLocation {
    Path,
    Query,
    Header,
    Cookie,
}

impl IrParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            IrParameterLocation::Path => "path",
            IrParameterLocation::Query => "query",
            IrParameterLocation::Header => "header",
            IrParameterLocation::Cookie => "cookie",
        }
    }
}

/// A resolved request body.
#[derive(Debug, Clone)]
pub struct IrRequestBody {
    pub body_type: IrType,
    pub required: bool,
    pub content_type: String,
    pub description: Option<String>,
}
