//! Call-site metadata and the capability that supplies it.

use core::fmt;

/// Where a log call came from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallSite {
    /// Fully qualified function path
    pub function: String,
    /// Source file path
    pub file: String,
    /// 1-based line number, 0 when unknown
    pub line: u32,
}

impl CallSite {
    /// Build a call site.
    #[must_use]
    pub fn new(function: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            function: function.into(),
            file: file.into(),
            line,
        }
    }

    /// Placeholder used when a frame cannot be resolved.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new("<unknown>", "<unknown>", 0)
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}:{}]", self.function, self.file, self.line)
    }
}

/// Resolves the call site `skip` frames above whoever calls [`ResolveCaller::resolve`].
///
/// `resolve(0)` is the function that invoked the resolver, `resolve(1)` its caller, and so
/// on. Any `Fn(usize) -> CallSite` is a resolver, which lets tests pin call sites.
pub trait ResolveCaller: Send + Sync {
    /// Resolve a frame.
    fn resolve(&self, skip: usize) -> CallSite;
}

impl<F> ResolveCaller for F
where
    F: Fn(usize) -> CallSite + Send + Sync,
{
    fn resolve(&self, skip: usize) -> CallSite {
        self(skip)
    }
}

/// Resolver that knows nothing; every frame is [`CallSite::unknown`].
#[derive(Copy, Clone, Debug, Default)]
pub struct UnknownCaller;

impl ResolveCaller for UnknownCaller {
    fn resolve(&self, _skip: usize) -> CallSite {
        CallSite::unknown()
    }
}

/// Resolver that walks the live call stack.
///
/// File and line need debug info. Inlined functions only show up as frames when debug
/// info is present, so helpers that log on behalf of their caller should be
/// `#[inline(never)]`. Frames that cannot be found come back as [`CallSite::unknown`].
#[cfg(feature = "stack-caller")]
#[derive(Copy, Clone, Debug, Default)]
pub struct StackResolver;

#[cfg(feature = "stack-caller")]
const OWN_FRAME: &str = "<tracelog::caller::StackResolver as tracelog::caller::ResolveCaller>::resolve";

#[cfg(feature = "stack-caller")]
impl ResolveCaller for StackResolver {
    #[inline(never)]
    fn resolve(&self, skip: usize) -> CallSite {
        let mut frames = Vec::<CallSite>::with_capacity(32);
        backtrace::trace(|frame| {
            backtrace::resolve_frame(frame, |symbol| {
                frames.push(CallSite {
                    function: symbol
                        .name()
                        .map(|n| format!("{n:#}"))
                        .unwrap_or_default(),
                    file: symbol
                        .filename()
                        .map(|p| p.display().to_string())
                        .unwrap_or_default(),
                    line: symbol.lineno().unwrap_or(0),
                });
            });
            true
        });

        // the unwinder and our own frames (closures included) come first
        let Some(own) = frames.iter().rposition(|f| f.function.starts_with(OWN_FRAME)) else {
            return CallSite::unknown();
        };
        frames
            .into_iter()
            .nth(own.saturating_add(1).saturating_add(skip))
            .filter(|f| !f.function.is_empty())
            .unwrap_or_else(CallSite::unknown)
    }
}

/// Path of the enclosing function, e.g. `my_crate::handlers::login`.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn __tracelog_here() {}
        fn __tracelog_type_name<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        let name = __tracelog_type_name(__tracelog_here);
        name.strip_suffix("::__tracelog_here").unwrap_or(name)
    }};
}
