#[path = "session/policy.rs"]
mod policy;

#[path = "session/requester.rs"]
mod requester;

#[path = "session/worker.rs"]
mod worker;


pub use policy::RetryPolicy;
pub use requester::{Session, API_ERROR_REPLY, UNPROCESSED_REPLY};
pub use worker::{Command, SessionHandle, SessionWorker};
