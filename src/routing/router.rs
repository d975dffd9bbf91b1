//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store the ordered route table
//! - Look up the behavior for a request path
//! - Return matched behavior, structural mismatch, or fallback
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan in priority order (the table is small and fixed)
//! - First structural match wins, even if the handler later rejects the input
//! - Explicit Fallback rather than silent default

use crate::routing::matcher::{ExactPathMatcher, Matcher, PathPrefixMatcher};

/// The behavior handler a route selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Status,
    Delay,
    Bytes,
    Cache,
    CacheFor,
    Anything,
    UserAgent,
    Ip,
    Bearer,
    Redirect,
    Unstable,
    Index,
}

impl Behavior {
    /// Stable label used in logs and metrics.
    pub fn name(self) -> &'static str {
        match self {
            Behavior::Status => "status",
            Behavior::Delay => "delay",
            Behavior::Bytes => "bytes",
            Behavior::Cache => "cache",
            Behavior::CacheFor => "cache_for",
            Behavior::Anything => "anything",
            Behavior::UserAgent => "user_agent",
            Behavior::Ip => "ip",
            Behavior::Bearer => "bearer",
            Behavior::Redirect => "redirect",
            Behavior::Unstable => "unstable",
            Behavior::Index => "index",
        }
    }
}

/// How many path segments a route expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// The matcher alone decides; no parameter is extracted.
    Fixed,
    /// `/<prefix>/<param>`: exactly three `/`-separated parts, the last non-empty.
    Parameterized,
}

/// A single entry in the route table.
#[derive(Debug)]
pub struct Route {
    pub behavior: Behavior,
    pub arity: Arity,
    matcher: Box<dyn Matcher>,
}

impl Route {
    fn exact(path: &str, behavior: Behavior) -> Self {
        Self {
            behavior,
            arity: Arity::Fixed,
            matcher: Box::new(ExactPathMatcher::new(path)),
        }
    }

    fn parameterized(prefix: &str, behavior: Behavior) -> Self {
        Self {
            behavior,
            arity: Arity::Parameterized,
            matcher: Box::new(PathPrefixMatcher::new(prefix)),
        }
    }
}

/// Outcome of looking a path up in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// A route matched and its shape is valid.
    Behavior {
        behavior: Behavior,
        param: Option<&'a str>,
    },
    /// A parameterized route's prefix matched but the segment count did not.
    Mismatch { behavior: Behavior },
    /// No route matched; serve a static asset or 404.
    Fallback,
}

/// Ordered, immutable route table.
#[derive(Debug)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// The fixed priority order of the fixture endpoints.
    pub fn standard() -> Self {
        Self {
            routes: vec![
                Route::parameterized("/status/", Behavior::Status),
                Route::parameterized("/delay/", Behavior::Delay),
                Route::parameterized("/bytes/", Behavior::Bytes),
                Route::exact("/cache", Behavior::Cache),
                Route::parameterized("/cache/", Behavior::CacheFor),
                Route::exact("/anything", Behavior::Anything),
                Route::exact("/user-agent", Behavior::UserAgent),
                Route::exact("/ip", Behavior::Ip),
                Route::exact("/bearer", Behavior::Bearer),
                Route::parameterized("/redirect/", Behavior::Redirect),
                Route::exact("/unstable", Behavior::Unstable),
                Route::exact("/", Behavior::Index),
            ],
        }
    }

    /// Routes in evaluation order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolve a request path to the first matching route.
    pub fn resolve<'a>(&self, path: &'a str) -> Resolution<'a> {
        let Some(route) = self.routes.iter().find(|r| r.matcher.matches(path)) else {
            return Resolution::Fallback;
        };

        match route.arity {
            Arity::Fixed => Resolution::Behavior {
                behavior: route.behavior,
                param: None,
            },
            Arity::Parameterized => match path_param(path) {
                Some(param) => Resolution::Behavior {
                    behavior: route.behavior,
                    param: Some(param),
                },
                None => Resolution::Mismatch {
                    behavior: route.behavior,
                },
            },
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::standard()
    }
}

/// Extract `<param>` from `/<prefix>/<param>`.
fn path_param(path: &str) -> Option<&str> {
    let mut parts = path.split('/');
    let (Some(""), Some(_), Some(param), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };
    (!param.is_empty()).then_some(param)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn behavior_of(path: &str) -> Option<Behavior> {
        match Router::standard().resolve(path) {
            Resolution::Behavior { behavior, .. } => Some(behavior),
            _ => None,
        }
    }

    #[test]
    fn test_priority_order() {
        let order: Vec<Behavior> = Router::standard()
            .routes()
            .iter()
            .map(|r| r.behavior)
            .collect();
        assert_eq!(
            order,
            vec![
                Behavior::Status,
                Behavior::Delay,
                Behavior::Bytes,
                Behavior::Cache,
                Behavior::CacheFor,
                Behavior::Anything,
                Behavior::UserAgent,
                Behavior::Ip,
                Behavior::Bearer,
                Behavior::Redirect,
                Behavior::Unstable,
                Behavior::Index,
            ]
        );
    }

    #[test]
    fn test_parameterized_routes_extract_param() {
        let router = Router::standard();
        assert_eq!(
            router.resolve("/status/200,404"),
            Resolution::Behavior {
                behavior: Behavior::Status,
                param: Some("200,404")
            }
        );
        assert_eq!(
            router.resolve("/cache/30"),
            Resolution::Behavior {
                behavior: Behavior::CacheFor,
                param: Some("30")
            }
        );
    }

    #[test]
    fn test_exact_routes() {
        assert_eq!(behavior_of("/cache"), Some(Behavior::Cache));
        assert_eq!(behavior_of("/anything"), Some(Behavior::Anything));
        assert_eq!(behavior_of("/user-agent"), Some(Behavior::UserAgent));
        assert_eq!(behavior_of("/ip"), Some(Behavior::Ip));
        assert_eq!(behavior_of("/bearer"), Some(Behavior::Bearer));
        assert_eq!(behavior_of("/unstable"), Some(Behavior::Unstable));
        assert_eq!(behavior_of("/"), Some(Behavior::Index));
    }

    #[test]
    fn test_wrong_segment_count_is_mismatch() {
        let router = Router::standard();
        assert_eq!(
            router.resolve("/status/200/extra"),
            Resolution::Mismatch {
                behavior: Behavior::Status
            }
        );
        assert_eq!(
            router.resolve("/redirect/"),
            Resolution::Mismatch {
                behavior: Behavior::Redirect
            }
        );
        assert_eq!(
            router.resolve("/bytes/10/"),
            Resolution::Mismatch {
                behavior: Behavior::Bytes
            }
        );
    }

    #[test]
    fn test_unknown_paths_fall_back() {
        let router = Router::standard();
        assert_eq!(router.resolve("/favicon.ico"), Resolution::Fallback);
        assert_eq!(router.resolve("/status"), Resolution::Fallback);
        assert_eq!(router.resolve("/anything/else"), Resolution::Fallback);
    }
}
