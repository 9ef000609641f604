// © 2022-2024 Jacob Riddle (ElementalAlchemist)
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

pub mod config;
pub mod draft;
pub mod preview;
pub mod schema;
pub mod session;
pub mod submission;
pub mod validation;
pub mod wizard;

#[cfg(test)]
mod test_support;
