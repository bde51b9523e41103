//! Wire and domain data model: raw submissions, canonical patient input,
//! and the final triage result.

pub mod patient;
pub mod result;
pub mod vitals;

pub use patient::{Gender, HistoryFlags, PatientInput, TriageRequest};
pub use result::{AiData, Confidence, TriageLevel, TriageResult};
pub use vitals::{RawVitals, Vitals};
