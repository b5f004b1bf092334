//! # allot-engine
//!
//! Assigns a supervisor and a moderator to every student under per-staff,
//! per-role quotas.
//!
//! A run opens an [`AllocationSession`] (roster plus capacity counters loaded
//! once from the store), hands it to one strategy, and gets back an
//! [`AllocationReport`]. The entry points below parse the import source first
//! so that an unusable file aborts before any row is processed.
//!
//! Record management (imports, bulk deletes, listings) lives in [`records`];
//! exports in [`export`].

pub mod capacity;
pub mod error;
pub mod export;
pub mod matching;
pub mod records;
pub mod roster;
pub mod session;
pub mod strategies;

use std::io;

use allot_config::EngineConfig;
use allot_core::entities::StaffMember;
use allot_core::enums::Role;
use allot_core::responses::AllocationReport;
use allot_db::AllotDb;

pub use error::{EngineError, Rejection};
pub use session::AllocationSession;
pub use strategies::manual::ManualTarget;

/// Run the self-report import over CSV text.
///
/// # Errors
///
/// Returns `EngineError` if the source is unparseable or the roster cannot be
/// loaded.
pub async fn allocate_self_report<R: io::Read>(
    db: &AllotDb,
    config: &EngineConfig,
    source: R,
) -> Result<AllocationReport, EngineError> {
    let rows = allot_tabular::read_self_report(source)?;
    let mut session = AllocationSession::open(db, config).await?;
    Ok(strategies::self_report::run(&mut session, &rows).await)
}

/// Run the student-choice import over CSV text.
///
/// # Errors
///
/// Returns `EngineError` if the source is unparseable or the roster cannot be
/// loaded.
pub async fn allocate_student_choice<R: io::Read>(
    db: &AllotDb,
    config: &EngineConfig,
    source: R,
) -> Result<AllocationReport, EngineError> {
    let form = allot_tabular::read_student_choice(source)?;
    let mut session = AllocationSession::open(db, config).await?;
    Ok(strategies::student_choice::run(&mut session, &form).await)
}

/// Fill every missing supervisor and moderator.
///
/// # Errors
///
/// Returns `EngineError` if the roster cannot be loaded.
pub async fn allocate_default(
    db: &AllotDb,
    config: &EngineConfig,
) -> Result<AllocationReport, EngineError> {
    let mut session = AllocationSession::open(db, config).await?;
    Ok(strategies::default_fill::run(&mut session).await)
}

/// Assign or clear one role for one student, bypassing capacity.
///
/// # Errors
///
/// Returns `EngineError` if the roster cannot be loaded.
pub async fn allocate_manual(
    db: &AllotDb,
    config: &EngineConfig,
    student: &str,
    role: Role,
    target: &ManualTarget,
) -> Result<AllocationReport, EngineError> {
    let mut session = AllocationSession::open(db, config).await?;
    Ok(strategies::manual::run(&mut session, student, role, target).await)
}

/// Staff an operator may pick for `role` of `student`; `None` when the
/// student is unknown.
///
/// # Errors
///
/// Returns `EngineError` if the roster cannot be loaded.
pub async fn manual_candidates(
    db: &AllotDb,
    config: &EngineConfig,
    student: &str,
    role: Role,
) -> Result<Option<Vec<StaffMember>>, EngineError> {
    let session = AllocationSession::open(db, config).await?;
    Ok(strategies::manual::candidates(&session, student, role)
        .map(|staff| staff.into_iter().cloned().collect()))
}
