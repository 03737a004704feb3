pub mod order_sync;
pub mod reconcile;

pub use order_sync::{TaskBoard, TaskRow};
pub use reconcile::{
    BatchKind, CommitError, CommitReceipt, CommitSink, DuplicateEntry, NameSet, ReconcilePlan,
};
