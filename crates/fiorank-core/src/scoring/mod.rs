// Dweve FioRank - FIO Benchmark Ranking Toolkit
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Ranking functions and the weighted-product scoring engine.

mod config;
mod engine;
mod registry;
mod result;

pub use config::{
    MappingFunction, ScoringComponent, ScoringConfiguration, BUILTIN_DESCRIPTION,
    DEFAULT_DESCRIPTION, DEFAULT_THRESHOLD_PENALTY, DEFAULT_WEIGHT,
};
pub use engine::{component_score, score_and_rank, score_system};
pub use registry::{RankingFunctions, RankingSource, ResolvedRanking, DEFAULT_FUNCTION_NAME};
pub use result::{ComponentScore, ScoringResult};
