pub mod models;
pub mod notifications;
pub mod schedule;
pub mod session;
pub mod timeline;
pub mod view;

pub use models::{JobExecution, JobStep, ProgressSnapshot, StatusHistoryEvent};
pub use session::{SessionHandle, SessionState};
pub use timeline::{ExecutionSummary, TimelineEntry, build_timeline};
pub use view::{ExecutionView, ViewStore};
