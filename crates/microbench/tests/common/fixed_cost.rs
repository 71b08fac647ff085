//! Helpers for building deterministic benchmarks on a manual clock

use microbench::clock::ManualClock;
use microbench::Registry;
use std::rc::Rc;

/// Shared manual clock that registered routines can advance
pub fn shared_clock() -> Rc<ManualClock> {
    Rc::new(ManualClock::new())
}

/// Register a routine costing exactly `cost_ns` simulated nanoseconds per call
pub fn register_fixed(
    registry: &mut Registry,
    clock: &Rc<ManualClock>,
    name: &str,
    cost_ns: u64,
    bytes: Option<u64>,
) {
    let clock = Rc::clone(clock);
    match bytes {
        Some(bytes) => registry.register_with_bytes(name, bytes, move || clock.advance(cost_ns)),
        None => registry.register(name, move || clock.advance(cost_ns)),
    };
}
