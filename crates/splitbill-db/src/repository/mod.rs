//! # Repository Implementations
//!
//! One repository per aggregate. Repositories own the SQL; callers work
//! with splitbill-core types only.

pub mod event;
