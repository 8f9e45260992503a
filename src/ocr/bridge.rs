//! Blocking bridge over WinRT async operations

use std::path::Path;

use windows::core::RuntimeType;
use windows::Foundation::IAsyncOperation;

use super::error::{OcrError, Stage};

/// Block until a started async operation completes
///
/// `op` is whatever starting the operation returned, so a failure to start
/// and a failure to complete surface the same way.
pub fn wait<T>(
    stage: Stage,
    path: &Path,
    op: windows::core::Result<IAsyncOperation<T>>,
) -> Result<T, OcrError>
where
    T: RuntimeType + 'static,
{
    op.and_then(|op| op.get())
        .map_err(|err| platform_error(stage, path, &err))
}

/// Wrap a WinRT error for one pipeline stage, keeping HRESULT and message
pub fn platform_error(stage: Stage, path: &Path, err: &windows::core::Error) -> OcrError {
    OcrError::Platform {
        stage,
        path: path.to_path_buf(),
        code: err.code().0,
        message: err.message().to_string(),
    }
}
