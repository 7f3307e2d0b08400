// Copyright (C) 2026 The Nalka Authors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations. Multi-row lifecycle operations (draw replacement,
//! departures, account deletion) each run in a single transaction so a
//! partially applied write is never observable.

pub mod draw;
pub mod events;
pub mod gifts;
pub mod members;
pub mod sessions;
pub mod users;
