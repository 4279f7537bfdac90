// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::PlatformError;
use crate::platform::{ExportTask, Expr, TaskId};

/// Connection to the remote geospatial platform.
///
/// This is the only place where expression graphs leave the process. One session is
/// created per run, passed by reference to whatever needs I/O, and closed explicitly.
#[async_trait]
pub trait Session: Send + Sync {
    /// Evaluate an expression and return its JSON value.
    async fn evaluate(&self, expr: &Expr) -> Result<Value, PlatformError>;

    /// Submit an export job. The job runs remotely; nothing tracks its completion.
    async fn start_export(&self, task: &ExportTask) -> Result<TaskId, PlatformError>;

    /// Release the session. Further calls are not expected after this.
    async fn close(&self) -> Result<(), PlatformError> {
        Ok(())
    }

    fn name(&self) -> &'static str;
}
