// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/mod.rs
//
// UI-free domain: selection geometry and document surfaces.

pub mod document;
pub mod geometry;
