use anyhow::Result;
use std::sync::OnceLock;
use tokio::runtime::Handle;

static RUNTIME: OnceLock<std::result::Result<tokio::runtime::Runtime, String>> = OnceLock::new();

/// The current runtime when called from async code, otherwise a lazily built
/// process-wide one so synchronous hosts can still spawn the catalog fetch.
pub(crate) fn runtime_handle() -> Result<Handle> {
    if let Ok(handle) = Handle::try_current() {
        return Ok(handle);
    }
    match RUNTIME.get_or_init(|| tokio::runtime::Runtime::new().map_err(|e| e.to_string())) {
        Ok(rt) => Ok(rt.handle().clone()),
        Err(message) => Err(anyhow::anyhow!(message.clone())),
    }
}
