//! # allot-core
//!
//! Core types and ID prefixes for Allot.
//!
//! This crate provides the foundational types shared across all Allot crates:
//! - Entity structs for the roster (students, staff, quota and interest records)
//! - The `Role` and `Collection` enums
//! - ID prefix constants
//! - Report and export response types

pub mod entities;
pub mod enums;
pub mod ids;
pub mod responses;
