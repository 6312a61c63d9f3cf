//! Application services for recording, querying, and resolving work.

mod ledger;
mod request;
pub mod resolution;
mod view;

pub use ledger::{LedgerService, LedgerServiceError, LedgerServiceResult};
pub use request::CreateRecordRequest;
pub use resolution::{ResolutionError, ResolutionResult, ResolutionWorkflow, ResolveRequest};
pub use view::RecordView;
