//! Cycle orchestration: dispatching one input through the staged pipeline or
//! the fast path, finalizing the chain, auditing and persisting it.

pub mod audit;
pub mod chain;
pub mod dispatch;
pub mod response;

pub use audit::{AuditIssue, AuditTrace, ChainAudit, audit_chain};
pub use chain::{ErrorRecord, ReasoningChain};
pub use dispatch::{Kernel, KernelPorts};
pub use response::compose_response;
