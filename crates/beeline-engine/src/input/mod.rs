pub mod pointer;
pub mod queue;
pub mod router;
