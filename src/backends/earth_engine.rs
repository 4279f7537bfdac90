// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! REST session against the Earth Engine v1 API.
//!
//! Endpoints used, all under `{endpoint}/v1/projects/{project}`:
//!
//! | Call                  | Endpoint        |
//! |-----------------------|-----------------|
//! | `evaluate`            | `value:compute` |
//! | image `start_export`  | `image:export`  |
//! | table `start_export`  | `table:export`  |
//!
//! Authentication is a bearer token read from `EE_ACCESS_TOKEN`; the project comes
//! from the config's `platform.project` or `EE_PROJECT`.

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::config::consts::{ACCESS_TOKEN_ENV, DEFAULT_PLATFORM_ENDPOINT, PROJECT_ENV};
use crate::config::PlatformConfig;
use crate::errors::PlatformError;
use crate::observability::messages::session::{
    EvaluationRequested, SessionClosed, SessionOpened,
};
use crate::observability::messages::StructuredLog;
use crate::platform::{ExportPayload, ExportTask, Expr, Expression, TaskId};
use crate::traits::Session;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

pub struct EarthEngineSession {
    client: reqwest::Client,
    endpoint: String,
    project: String,
    token: String,
    evaluations: AtomicUsize,
    exports: AtomicUsize,
}

impl EarthEngineSession {
    /// Open a session from config settings and the process environment.
    pub fn connect(settings: &PlatformConfig) -> Result<Self, PlatformError> {
        let project = settings
            .project
            .clone()
            .or_else(|| std::env::var(PROJECT_ENV).ok())
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| {
                PlatformError::NotConfigured(format!(
                    "no project in config 'platform.project' or ${}",
                    PROJECT_ENV
                ))
            })?;
        let token = std::env::var(ACCESS_TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                PlatformError::NotConfigured(format!("${} is not set", ACCESS_TOKEN_ENV))
            })?;
        let endpoint = settings
            .endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_PLATFORM_ENDPOINT.to_string());

        Self::new(&endpoint, &project, &token)
    }

    pub fn new(endpoint: &str, project: &str, token: &str) -> Result<Self, PlatformError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        let session = Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            project: project.to_string(),
            token: token.to_string(),
            evaluations: AtomicUsize::new(0),
            exports: AtomicUsize::new(0),
        };

        SessionOpened {
            endpoint: &session.endpoint,
            project: &session.project,
        }
        .log();

        Ok(session)
    }

    fn project_url(&self, method: &str) -> String {
        format!("{}/v1/projects/{}/{}", self.endpoint, self.project, method)
    }

    /// Fully-qualified asset name; relative ids land under this project's assets.
    fn asset_name(&self, asset_id: &str) -> String {
        if asset_id.starts_with("projects/") {
            asset_id.to_string()
        } else {
            format!("projects/{}/assets/{}", self.project, asset_id)
        }
    }

    /// Request body for `value:compute`.
    pub fn compute_request(expr: &Expr) -> Result<Value, PlatformError> {
        Ok(json!({ "expression": serde_json::to_value(Expression::from(expr))? }))
    }

    /// Endpoint method and request body for an export task.
    pub fn export_request(&self, task: &ExportTask) -> Result<(&'static str, Value), PlatformError> {
        let destination = json!({ "name": self.asset_name(&task.asset_id) });

        match &task.payload {
            ExportPayload::Image {
                image,
                region,
                scale,
                pyramiding_policy,
                max_pixels,
            } => {
                let prepared = image.clip_to_bounds_and_scale(region, *scale);

                let mut asset_options = Map::new();
                asset_options.insert("earthEngineDestination".to_string(), destination);
                let mut overrides = Map::new();
                for (band, policy) in pyramiding_policy {
                    let policy = Value::String(policy.to_ascii_uppercase());
                    if band == ".default" {
                        asset_options.insert("pyramidingPolicy".to_string(), policy);
                    } else {
                        overrides.insert(band.clone(), policy);
                    }
                }
                if !overrides.is_empty() {
                    asset_options.insert(
                        "pyramidingPolicyOverrides".to_string(),
                        Value::Object(overrides),
                    );
                }

                let body = json!({
                    "expression": serde_json::to_value(Expression::from(prepared.expr()))?,
                    "description": task.description,
                    "maxPixels": format!("{}", *max_pixels as u64),
                    "assetExportOptions": Value::Object(asset_options),
                });
                Ok(("image:export", body))
            }
            ExportPayload::Table { collection } => {
                let body = json!({
                    "expression": serde_json::to_value(Expression::from(collection.expr()))?,
                    "description": task.description,
                    "assetExportOptions": { "earthEngineDestination": destination },
                });
                Ok(("table:export", body))
            }
        }
    }

    async fn post(&self, url: &str, body: &Value) -> Result<Value, PlatformError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PlatformError::Rejected {
                endpoint: url.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl Session for EarthEngineSession {
    async fn evaluate(&self, expr: &Expr) -> Result<Value, PlatformError> {
        let url = self.project_url("value:compute");
        EvaluationRequested {
            url: &url,
            root_function: expr.function_name().unwrap_or("<constant>"),
        }
        .log();

        let body = Self::compute_request(expr)?;
        let mut response = self.post(&url, &body).await?;
        self.evaluations.fetch_add(1, Ordering::Relaxed);

        match response.get_mut("result").map(Value::take) {
            Some(result) => Ok(result),
            None => Err(PlatformError::UnexpectedResult(format!(
                "value:compute response has no 'result': {}",
                response
            ))),
        }
    }

    async fn start_export(&self, task: &ExportTask) -> Result<TaskId, PlatformError> {
        let (method, body) = self.export_request(task)?;
        let response = self.post(&self.project_url(method), &body).await?;
        self.exports.fetch_add(1, Ordering::Relaxed);

        response
            .get("name")
            .and_then(Value::as_str)
            .map(|name| TaskId(name.rsplit('/').next().unwrap_or(name).to_string()))
            .ok_or_else(|| {
                PlatformError::UnexpectedResult(format!(
                    "{} response has no operation name: {}",
                    method, response
                ))
            })
    }

    async fn close(&self) -> Result<(), PlatformError> {
        SessionClosed {
            project: &self.project,
            evaluations: self.evaluations.load(Ordering::Relaxed),
            exports: self.exports.load(Ordering::Relaxed),
        }
        .log();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "earth_engine"
    }
}
