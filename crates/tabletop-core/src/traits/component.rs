// SPDX-FileCopyrightText: 2026 Tabletop Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait for long-lived service components.

use async_trait::async_trait;

use crate::error::TabletopError;
use crate::types::HealthStatus;

/// Identity, health, and shutdown for components wired up at startup.
#[async_trait]
pub trait Component: Send + Sync + 'static {
    /// Returns the human-readable name of this component.
    fn name(&self) -> &str;

    /// Performs a health check and returns the component's current status.
    async fn health_check(&self) -> Result<HealthStatus, TabletopError>;

    /// Gracefully shuts down the component, releasing any held resources.
    async fn shutdown(&self) -> Result<(), TabletopError> {
        Ok(())
    }
}
