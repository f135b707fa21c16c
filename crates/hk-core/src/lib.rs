//! Core identifier, time, RNG and error primitives shared by every crate in
//! the workspace.
//!
//! | Module | Contents |
//! |---|---|
//! | [`ids`] | `AgentId`, `AgentTypeId` |
//! | [`time`] | `Minutes`, month bucketing |
//! | [`rng`] | `SimRng`, `sample_weighted` |
//! | [`error`] | `HkError`, `HkResult` |

mod error;
mod ids;
mod rng;
mod time;

pub use error::{HkError, HkResult};
pub use ids::{AgentId, AgentTypeId};
pub use rng::{sample_weighted, SimRng};
pub use time::{month_horizon, Minutes, APPROX_MONTH_MINUTES};
