// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only database operations.

pub mod assignments;
pub mod events;
pub mod gifts;
pub mod members;
pub mod sessions;
pub mod users;
