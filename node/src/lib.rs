// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod api;
pub mod clock;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod reconcile;
pub mod server;
pub mod storage;
pub mod telemetry;
pub mod upload;
pub mod verify;
