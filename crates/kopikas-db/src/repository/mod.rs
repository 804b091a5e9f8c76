//! # Repositories
//!
//! Owner-scoped data access, one repository per aggregate.

pub mod payment;
