// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for cadence-cli
// ABOUTME: Provides access to plan, macrocycle and zone commands

pub mod plan;
pub mod zones;
