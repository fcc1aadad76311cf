// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/view/mod.rs
//
// Interactive views.

pub mod crop;
