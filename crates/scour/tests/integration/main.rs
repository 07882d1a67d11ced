//! End-to-end schema validation tests.

mod properties;
mod schemas;
