// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports helper modules for cadence-cli
// ABOUTME: Provides request loading and JSON output utilities

pub mod io;
