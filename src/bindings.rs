// SPDX-License-Identifier: Parity-7.0.0 OR PolyForm-Noncommercial-1.0.0
/*! Shadow binding state.

The types here mirror what the driver has bound or set, so [`crate::Context`] can decide
whether a bind needs to reach the driver without asking it.  They never talk to the
driver themselves.  Every setter reports whether the mirrored value changed; the
context issues a driver call exactly when it did.
*/

mod render_state;
mod shadow;
mod texture_units;

pub use shadow::IndexedBinding;
pub(crate) use render_state::RenderShadow;
pub(crate) use shadow::Shadow;
pub(crate) use texture_units::TextureUnits;
