//! Hash router
//!
//! Routes are path templates such as `/document-viewer/:studentId/:documentType`.
//! Templates without parameters are matched by exact lookup; the rest are
//! compiled into anchored regular expressions and tried in registration
//! order. An exact route always wins over a pattern route, whatever order the
//! two were registered in.

use crate::error::{RouterError, RouterResult};
use regex::Regex;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Parameters extracted from a matched path, in template order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams(Vec<(String, String)>);

impl RouteParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A parsed location hash: `#/students?status=active`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Normalized path, always starting with `/`
    pub path: String,
    /// Decoded query pairs
    pub query: Vec<(String, String)>,
}

impl Location {
    /// Parse a hash or bare path
    ///
    /// The `#` prefix and query are stripped, an empty path becomes `/` and a
    /// single trailing `/` is dropped.
    pub fn parse(hash: &str) -> Self {
        let raw = hash.strip_prefix('#').unwrap_or(hash);
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (raw, None),
        };

        let mut path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        if path.len() > 1 && path.ends_with('/') {
            path.pop();
        }

        let query = query
            .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();

        Self { path, query }
    }

    /// Link target for a path: `/students` becomes `#/students`
    pub fn href(path: &str) -> String {
        if path.starts_with('/') {
            format!("#{path}")
        } else {
            format!("#/{path}")
        }
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Result of resolving a path
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    /// The template that matched
    pub template: &'a str,
    pub handler: &'a H,
    pub params: RouteParams,
    pub location: Location,
}

#[derive(Debug)]
enum Matcher {
    Exact,
    Pattern { regex: Regex, names: Vec<String> },
}

#[derive(Debug)]
struct Route<H> {
    template: String,
    matcher: Matcher,
    handler: H,
}

/// Maps path templates to handlers
#[derive(Debug)]
pub struct Router<H> {
    routes: Vec<Route<H>>,
    exact: HashMap<String, usize>,
    not_found: Option<H>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            exact: HashMap::new(),
            not_found: None,
        }
    }
}

impl<H> Router<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for a path template
    ///
    /// Registering a template again replaces its handler but keeps its place
    /// in the matching order.
    pub fn register(&mut self, template: &str, handler: H) -> RouterResult<()> {
        let template = normalize_template(template)?;
        let matcher = compile(&template)?;

        if let Some(existing) = self.routes.iter_mut().find(|r| r.template == template) {
            debug!(template = %template, "Replacing route handler");
            existing.handler = handler;
            return Ok(());
        }

        if matches!(matcher, Matcher::Exact) {
            self.exact.insert(template.clone(), self.routes.len());
        }
        debug!(template = %template, "Registered route");
        self.routes.push(Route {
            template,
            matcher,
            handler,
        });
        Ok(())
    }

    /// Handler used by [`Router::resolve_or_fallback`] when nothing matches
    pub fn set_not_found(&mut self, handler: H) {
        self.not_found = Some(handler);
    }

    /// Match a hash or path against the registered routes
    pub fn resolve(&self, hash: &str) -> Option<RouteMatch<'_, H>> {
        let location = Location::parse(hash);

        if let Some(&index) = self.exact.get(&location.path) {
            let route = &self.routes[index];
            trace!(path = %location.path, template = %route.template, "Exact route matched");
            return Some(RouteMatch {
                template: &route.template,
                handler: &route.handler,
                params: RouteParams::default(),
                location,
            });
        }

        for route in &self.routes {
            let Matcher::Pattern { regex, names } = &route.matcher else {
                continue;
            };
            let Some(captures) = regex.captures(&location.path) else {
                continue;
            };

            let params = names
                .iter()
                .zip(captures.iter().skip(1))
                .filter_map(|(name, value)| Some((name.clone(), value?.as_str().to_string())))
                .collect();

            trace!(path = %location.path, template = %route.template, "Pattern route matched");
            return Some(RouteMatch {
                template: &route.template,
                handler: &route.handler,
                params,
                location,
            });
        }

        debug!(path = %location.path, "No route matched");
        None
    }

    /// Like [`Router::resolve`], falling back to the not-found handler
    pub fn resolve_or_fallback(&self, hash: &str) -> Option<RouteMatch<'_, H>> {
        self.resolve(hash).or_else(|| {
            self.not_found.as_ref().map(|handler| RouteMatch {
                template: "*",
                handler,
                params: RouteParams::default(),
                location: Location::parse(hash),
            })
        })
    }

    pub fn contains(&self, template: &str) -> bool {
        normalize_template(template)
            .map(|t| self.routes.iter().any(|r| r.template == t))
            .unwrap_or(false)
    }

    /// Registered templates in matching order
    pub fn templates(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|r| r.template.as_str())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn normalize_template(template: &str) -> RouterResult<String> {
    let template = template.trim();
    if !template.starts_with('/') {
        return Err(RouterError::NotAbsolute(template.to_string()));
    }
    let mut template = template.to_string();
    if template.len() > 1 && template.ends_with('/') {
        template.pop();
    }
    Ok(template)
}

fn is_param_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn compile(template: &str) -> RouterResult<Matcher> {
    if !template.contains("/:") {
        return Ok(Matcher::Exact);
    }

    let mut names: Vec<String> = Vec::new();
    let mut pattern = String::from("^");

    for segment in template.split('/').skip(1) {
        pattern.push('/');
        match segment.strip_prefix(':') {
            Some(name) => {
                if !is_param_name(name) {
                    return Err(RouterError::InvalidParameter {
                        template: template.to_string(),
                        segment: segment.to_string(),
                    });
                }
                if names.iter().any(|n| n == name) {
                    return Err(RouterError::DuplicateParameter {
                        template: template.to_string(),
                        name: name.to_string(),
                    });
                }
                names.push(name.to_string());
                pattern.push_str("([^/]+)");
            }
            None => pattern.push_str(&regex::escape(segment)),
        }
    }
    pattern.push('$');

    let regex = Regex::new(&pattern).map_err(|e| RouterError::Compile {
        template: template.to_string(),
        detail: e.to_string(),
    })?;

    Ok(Matcher::Pattern { regex, names })
}
