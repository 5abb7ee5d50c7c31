//! Domain types shared by every SWAP crate.

pub mod classification;
pub mod collections;
pub mod history;
pub mod label;
pub mod subject_kind;
pub mod status;
pub mod timestamp;

pub use classification::{Classification, ClassificationRecord};
pub use history::{Annotation, HistoryEntry};
pub use label::{Truth, Verdict};
pub use subject_kind::{Category, SubjectKind};
pub use status::{SubjectState, SubjectStatus};
