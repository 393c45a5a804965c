//! Include registry.
//!
//! Every discovered include file is compiled into a shared MiniJinja
//! environment under its base name, and a single `include(name, args={})`
//! function is installed for page templates. The function renders the named
//! include against the content bundle with the caller's arguments under
//! `args`. Unknown names fail when the calling template renders, not when the
//! registry is built.

use crate::config::CollisionPolicy;
use crate::constants::{INCLUDE_PREFIX, MAX_INCLUDE_DEPTH};
use crate::content::ContentBundle;
use crate::discovery::TemplateFile;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::{debug, warn};
use minijinja::{AutoEscape, Environment, ErrorKind, State, Value};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

thread_local! {
    static INCLUDE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// One level of `include` nesting on the current thread, released on drop.
struct IncludeDepth;

impl IncludeDepth {
    fn enter(name: &str) -> std::result::Result<Self, minijinja::Error> {
        let depth = INCLUDE_DEPTH.with(|depth| {
            depth.set(depth.get() + 1);
            depth.get()
        });
        let guard = IncludeDepth;
        if depth > MAX_INCLUDE_DEPTH {
            return Err(minijinja::Error::new(
                ErrorKind::InvalidOperation,
                format!("include recursion limit of {MAX_INCLUDE_DEPTH} exceeded at '{name}'"),
            ));
        }
        Ok(guard)
    }
}

impl Drop for IncludeDepth {
    fn drop(&mut self) {
        INCLUDE_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

/// Derives an include's name: directory and last extension stripped.
///
/// `views/includes/layout/header.html` → `header`
pub fn include_name(path: &Path) -> Option<String> {
    path.file_stem().and_then(|stem| stem.to_str()).map(str::to_string)
}

fn include_key(name: &str) -> String {
    format!("{INCLUDE_PREFIX}{name}")
}

/// Builds the context an include renders against: the bundle plus `args`.
fn include_context(
    bundle: &ContentBundle,
    args: Option<Value>,
) -> std::result::Result<serde_json::Value, minijinja::Error> {
    let args = match args {
        Some(args) if !args.is_undefined() && !args.is_none() => serde_json::to_value(&args)
            .map_err(|e| minijinja::Error::new(ErrorKind::InvalidOperation, e.to_string()))?,
        _ => serde_json::Value::Object(serde_json::Map::new()),
    };
    let mut context = bundle.as_map().clone();
    context.insert("args".to_string(), args);
    Ok(serde_json::Value::Object(context))
}

fn not_registered(name: &str) -> minijinja::Error {
    minijinja::Error::new(
        ErrorKind::TemplateNotFound,
        format!("include '{name}' is not registered"),
    )
}

/// The result of compiling the include root: a template environment holding
/// every include plus the `include` function, ready for page templates.
pub struct CompiledIncludes {
    env: Environment<'static>,
    names: IndexMap<String, PathBuf>,
    bundle: Arc<ContentBundle>,
}

impl std::fmt::Debug for CompiledIncludes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledIncludes").field("names", &self.names).finish_non_exhaustive()
    }
}

impl CompiledIncludes {
    /// Compiles `files` into a fresh environment.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if an include has a syntax error
    /// * `Error::IncludeCollision` if two files share a name under
    ///   [`CollisionPolicy::Reject`]
    pub fn compile(
        files: &[TemplateFile],
        bundle: Arc<ContentBundle>,
        policy: CollisionPolicy,
    ) -> Result<Self> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);

        let mut names: IndexMap<String, PathBuf> = IndexMap::new();
        for file in files {
            let Some(name) = include_name(&file.path) else {
                warn!("Skipping include with unusable name: {}", file.path.display());
                continue;
            };

            if let Some(previous) = names.get(&name) {
                match policy {
                    CollisionPolicy::Reject => {
                        return Err(Error::IncludeCollision {
                            name,
                            first: previous.display().to_string(),
                            second: file.path.display().to_string(),
                        });
                    }
                    CollisionPolicy::Overwrite => warn!(
                        "Include '{}' from {} replaces {}",
                        name,
                        file.path.display(),
                        previous.display()
                    ),
                }
            }

            env.add_template_owned(include_key(&name), file.source.clone())?;
            debug!("Compiled include '{}' from {}", name, file.path.display());
            names.insert(name, file.path.clone());
        }

        let captured = Arc::clone(&bundle);
        env.add_function(
            "include",
            move |state: &State,
                  name: String,
                  args: Option<Value>|
                  -> std::result::Result<Value, minijinja::Error> {
                let _depth = IncludeDepth::enter(&name)?;
                let template = state
                    .env()
                    .get_template(&include_key(&name))
                    .map_err(|_| not_registered(&name))?;
                let rendered = template.render(include_context(&captured, args)?)?;
                Ok(Value::from_safe_string(rendered))
            },
        );

        Ok(Self { env, names, bundle })
    }

    /// Registered include names, in compilation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// File the include `name` was compiled from.
    pub fn source_of(&self, name: &str) -> Option<&Path> {
        self.names.get(name).map(PathBuf::as_path)
    }

    /// Evaluates `include(name, args)` outside of a page template.
    pub fn render(&self, name: &str, args: serde_json::Value) -> Result<String> {
        let template = self
            .env
            .get_template(&include_key(name))
            .map_err(|_| not_registered(name))?;
        let context = include_context(&self.bundle, Some(Value::from_serialize(&args)))?;
        Ok(template.render(context)?)
    }

    pub(crate) fn into_environment(self) -> Environment<'static> {
        self.env
    }
}
