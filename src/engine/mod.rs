// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod runner;
pub mod wrapper;

pub use runner::ImageRunner;
pub use wrapper::{AccuracyOutput, ModelOutput, Wrapper, ORDINATION_METHOD_PROPERTY};
