//! Statelang Config
//!
//! Serializable data-flow fields of a state definition. A full state object
//! can be parsed directly; fields other than `InputPath`, `Parameters`,
//! `ResultPath` and `OutputPath` are ignored.
//!
//! ```json
//! {
//!   "Type": "Task",
//!   "InputPath": "$.order",
//!   "Parameters": { "id.$": "$.orderId", "source": "web" },
//!   "ResultPath": "$.taskresult",
//!   "OutputPath": null
//! }
//! ```

mod dataflow;
mod error;

pub use dataflow::DataFlowDef;
pub use error::ConfigError;
