//! Template variable discovery.
//!
//! The composed template is rendered once against a recording context instead
//! of real answers. Looking a name up on the context, or an attribute up on a
//! value obtained from it, yields a [`Placeholder`] that remembers the dotted
//! path leading to it and records that path. Once rendering ends, a path is
//! dropped when a longer path below it was also recorded, so `network.hostname`
//! stands for both itself and `network`.
//!
//! Placeholders are falsy and iterate as empty. Conditions and loop iterables
//! are recorded, but a variable that only appears inside a block guarded by a
//! condition on absent data is not seen.

use crate::error::Result;
use indexmap::IndexSet;
use log::debug;
use minijinja::value::{Enumerator, Object, ObjectRepr, Value};
use minijinja::Environment;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Global functions provided by minijinja that the recording context must not shadow.
const BUILTIN_GLOBALS: [&str; 4] = ["range", "dict", "namespace", "debug"];

/// Insertion-ordered set of discovered dotted paths, owned by one discovery call.
#[derive(Debug, Default, Clone)]
pub struct PathSink {
    paths: Arc<Mutex<IndexSet<String>>>,
}

impl PathSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, path: &str) {
        let mut paths = self.paths.lock().unwrap_or_else(PoisonError::into_inner);
        paths.insert(path.to_string());
    }

    /// Takes the paths recorded so far, keeping only the deepest of each chain.
    pub fn into_paths(self) -> IndexSet<String> {
        let paths = {
            let mut guard = self.paths.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *guard)
        };
        deepest_paths(paths)
    }
}

/// Removes every path that is the parent of another path in the set.
fn deepest_paths(paths: IndexSet<String>) -> IndexSet<String> {
    let parents: IndexSet<&str> = paths
        .iter()
        .flat_map(|path| path.match_indices('.').map(move |(i, _)| &path[..i]))
        .collect();
    paths.iter().filter(|path| !parents.contains(path.as_str())).cloned().collect()
}

impl Placeholder {
    fn recorded(path: String, sink: &PathSink) -> Value {
        sink.record(&path);
        Value::from_object(Placeholder { path, sink: sink.clone() })
    }
}

/// Root context of a discovery render. Every name resolves to a placeholder.
#[derive(Debug)]
struct RecordingContext {
    sink: PathSink,
}

impl Object for RecordingContext {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Map
    }

    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        let name = key.as_str()?;
        if BUILTIN_GLOBALS.contains(&name) {
            return None;
        }
        Some(Placeholder::recorded(name.to_string(), &self.sink))
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        Enumerator::Empty
    }
}

/// A value standing in for an absent variable.
#[derive(Debug)]
pub struct Placeholder {
    path: String,
    sink: PathSink,
}

impl Object for Placeholder {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Map
    }

    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        let segment = match key.as_str() {
            Some(s) => s.to_string(),
            None => key.to_string(),
        };
        Some(Placeholder::recorded(format!("{}.{}", self.path, segment), &self.sink))
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        Enumerator::Empty
    }

    fn is_true(self: &Arc<Self>) -> bool {
        false
    }

    fn render(self: &Arc<Self>, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        Self: Sized + 'static,
    {
        f.write_str(&self.path)
    }
}

/// Returns every dotted variable path the template references, in first-seen order.
///
/// Each call owns its own result set, so concurrent discoveries never share state.
///
/// # Errors
/// * `Error::RenderError` if the template does not compile
pub fn discover(template: &str) -> Result<IndexSet<String>> {
    let sink = PathSink::new();
    let context = Value::from_object(RecordingContext { sink: sink.clone() });

    let mut env = Environment::new();
    env.add_template("discovery", template)?;
    env.get_template("discovery")?.render(context)?;

    let paths = sink.into_paths();
    debug!("Discovered variables: {:?}", paths);
    Ok(paths)
}
