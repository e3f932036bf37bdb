//! Internal kernels and their coefficient tables.
//!
//! Every kernel is a small evaluator struct borrowing the caches it needs
//! (`PowerSeries`, `MillerBackward`, `YoshidaPade`, `Recurrence`) or, for
//! the Hankel expansion, a per-order coefficient object held in the caches.
//! Kernels never fail: a sum that does not settle within its budget comes
//! back as NaN and the dispatcher passes it through.
//!
//! Arguments handed to a kernel are already reduced to the closed first
//! quadrant.

pub(crate) mod gamma;

// Direct kernels
pub(crate) mod hankel;
pub(crate) mod miller;
pub(crate) mod series;

// K in the mid annulus
pub(crate) mod legendre;
pub(crate) mod pade;

// Large orders and near-integer orders
pub(crate) mod interp;
pub(crate) mod recurrence;
