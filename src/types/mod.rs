// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for smart plug state.
//!
//! These types give a strict shape to the loosely-typed fields a plug
//! reports in its system info.
//!
//! # Types
//!
//! - [`SwitchState`] - On/Off/Unknown relay state
//! - [`Feature`] / [`FeatureSet`] - Optional capabilities advertised by the device

mod feature;
mod switch_state;
mod value;

pub use feature::{Feature, FeatureSet};
pub use switch_state::SwitchState;
pub use value::{is_truthy, json_type_name, on_since_at};
