//! Runtime registry of benchmarks
//!
//! Benchmarks are plain `(name, callable)` pairs held in registration order.
//! The callable's return value is consumed through [`black_box`] so that a
//! registered operation can return whatever it computes.

use crate::sink::black_box;

type Routine = Box<dyn FnMut()>;

/// A single registered benchmark.
pub struct Benchmark {
    name: String,
    bytes: Option<u64>,
    routine: Routine,
}

impl Benchmark {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bytes processed by one call, if declared.
    pub fn bytes(&self) -> Option<u64> {
        self.bytes
    }

    /// The measured operation.
    pub fn routine_mut(&mut self) -> &mut dyn FnMut() {
        &mut *self.routine
    }
}

impl std::fmt::Debug for Benchmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Benchmark")
            .field("name", &self.name)
            .field("bytes", &self.bytes)
            .finish_non_exhaustive()
    }
}

/// Ordered collection of benchmarks.
///
/// # Examples
///
/// ```
/// use microbench::registry::Registry;
///
/// let data: Vec<u64> = (0..1024).collect();
/// let mut registry = Registry::new();
/// registry
///     .register("checked_add", || 2_u64.checked_add(2))
///     .register_with_bytes("sum_1k", 8 * 1024, move || data.iter().sum::<u64>());
///
/// assert_eq!(registry.names().collect::<Vec<_>>(), vec!["checked_add", "sum_1k"]);
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    benchmarks: Vec<Benchmark>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operation under `name`.
    pub fn register<T, F>(&mut self, name: impl Into<String>, routine: F) -> &mut Self
    where
        F: FnMut() -> T + 'static,
    {
        self.push(name.into(), None, routine)
    }

    /// Register an operation that processes `bytes` bytes per call.
    pub fn register_with_bytes<T, F>(
        &mut self,
        name: impl Into<String>,
        bytes: u64,
        routine: F,
    ) -> &mut Self
    where
        F: FnMut() -> T + 'static,
    {
        self.push(name.into(), Some(bytes), routine)
    }

    fn push<T, F>(&mut self, name: String, bytes: Option<u64>, mut routine: F) -> &mut Self
    where
        F: FnMut() -> T + 'static,
    {
        self.benchmarks.push(Benchmark {
            name,
            bytes,
            routine: Box::new(move || {
                black_box(routine());
            }),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }

    /// Benchmark names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.benchmarks.iter().map(Benchmark::name)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Benchmark> {
        self.benchmarks.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_registry_preserves_order() {
        let mut registry = Registry::new();
        registry
            .register("b", || 1)
            .register("a", || "two")
            .register("c", || vec![3]);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_registry_empty() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.names().count(), 0);
    }

    #[test]
    fn test_registered_routine_runs() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);

        let mut registry = Registry::new();
        registry.register_with_bytes("count", 16, move || {
            counter.set(counter.get() + 1);
            counter.get()
        });

        let bench = registry.iter_mut().next().unwrap();
        assert_eq!(bench.name(), "count");
        assert_eq!(bench.bytes(), Some(16));

        let routine = bench.routine_mut();
        routine();
        routine();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_benchmark_debug_omits_routine() {
        let mut registry = Registry::new();
        registry.register("noop", || ());
        let debug = format!("{:?}", registry);
        assert!(debug.contains("noop"));
    }
}
