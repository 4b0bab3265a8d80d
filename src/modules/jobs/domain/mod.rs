pub mod entities;
pub mod repository;
pub mod status;
pub mod value_objects;

pub use entities::{BackoffKind, BackoffPolicy, EnqueueOptions, Job, JobRecord, JobStatus};
pub use repository::JobRepository;
pub use status::{QueuePhase, QueueStatusRecord, QueueStatusRepository};
pub use value_objects::{JobStatusDb, QueuePhaseDb};
