// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::errors::PlatformError;
use crate::platform::{ExportTask, Expr, TaskId};
use crate::traits::Session;

/// A session that records every request and answers evaluations from a queue
pub struct RecordingSession {
    responses: Mutex<VecDeque<Value>>,
    evaluated: Mutex<Vec<Expr>>,
    exports: Mutex<Vec<ExportTask>>,
    closed: Mutex<bool>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::with_responses(Vec::new())
    }

    /// Evaluations are answered in order from `responses`.
    pub fn with_responses(responses: Vec<Value>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            evaluated: Mutex::new(Vec::new()),
            exports: Mutex::new(Vec::new()),
            closed: Mutex::new(false),
        }
    }

    pub fn evaluated(&self) -> Vec<Expr> {
        self.evaluated.lock().unwrap().clone()
    }

    pub fn exports(&self) -> Vec<ExportTask> {
        self.exports.lock().unwrap().clone()
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.lock().unwrap()
    }
}

#[async_trait]
impl Session for RecordingSession {
    async fn evaluate(&self, expr: &Expr) -> Result<Value, PlatformError> {
        self.evaluated.lock().unwrap().push(expr.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| PlatformError::UnexpectedResult("no canned response left".to_string()))
    }

    async fn start_export(&self, task: &ExportTask) -> Result<TaskId, PlatformError> {
        let mut exports = self.exports.lock().unwrap();
        exports.push(task.clone());
        Ok(TaskId(format!("TASK{}", exports.len())))
    }

    async fn close(&self) -> Result<(), PlatformError> {
        *self.closed.lock().unwrap() = true;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// A session whose export submissions are always rejected
pub struct FailingSession {
    responses: Mutex<VecDeque<Value>>,
}

impl FailingSession {
    pub fn with_responses(responses: Vec<Value>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl Session for FailingSession {
    async fn evaluate(&self, _expr: &Expr) -> Result<Value, PlatformError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| PlatformError::UnexpectedResult("no canned response left".to_string()))
    }

    async fn start_export(&self, task: &ExportTask) -> Result<TaskId, PlatformError> {
        Err(PlatformError::Rejected {
            endpoint: task.asset_id.clone(),
            status: 429,
            message: "Simulated quota exhaustion".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
