/*!
 * Monitoring Module
 * Structured tracing for the simulator driver
 */

pub mod tracer;

pub use tracer::{generate_trace_id, init_tracing, CommandSpan};
