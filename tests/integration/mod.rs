// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod concurrency_test;
pub mod helpers;
pub mod queue_contract_test;
