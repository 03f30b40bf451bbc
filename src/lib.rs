//! Workspace-level integration tests for PiBench live under `tests/`.
