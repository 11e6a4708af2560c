//! Sealed trait marker for Transport implementations.
//!
//! Keeping the trait sealed means every implementation that can carry card
//! data on the wire lives inside this crate and goes through review.

pub(crate) mod private {
    /// Sealed trait marker.
    ///
    /// Cannot be implemented outside this crate, so no external transport
    /// can sit between the signed body and the wire.
    pub trait Sealed {}
}
