pub mod app_core;
mod async_runtime;
mod debounce;
pub mod domain;
pub mod kernel;
pub mod ports;
pub mod viewmodel;

pub use app_core::*;
pub use domain::{AppState, BootState, LoadId, TimelineState};
pub use kernel::AppKernel;
pub use ports::*;
pub use viewmodel::*;
