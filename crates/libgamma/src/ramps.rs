//! Gamma ramps.
//!
//! A [`GammaRamps`] owns one allocation holding the red, green and blue
//! channels back to back. The channels are handed out as views into that
//! block. Nothing but the whole block is ever freed.

use std::ops::Deref;

use libgamma_native::{NativeRamps, gamma_ramps_initialise};
use tracing::trace;

use crate::error::{Result, create_error};

pub use libgamma_native::RampElement;

/// A read-only view of one channel.
#[derive(Debug, Clone, Copy)]
pub struct Ramp<'a, T> {
    values: &'a [T],
}

impl<'a, T> Ramp<'a, T> {
    /// Number of stops.
    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// The stops as a slice.
    pub fn as_slice(&self) -> &'a [T] {
        self.values
    }
}

impl<T> Deref for Ramp<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.values
    }
}

/// Red, green and blue ramps in one allocation.
#[derive(Debug)]
pub struct GammaRamps<T: RampElement> {
    native: NativeRamps<T>,
}

/// Ramps with 8-bit stops.
pub type GammaRamps8 = GammaRamps<u8>;
/// Ramps with 16-bit stops.
pub type GammaRamps16 = GammaRamps<u16>;
/// Ramps with 32-bit stops.
pub type GammaRamps32 = GammaRamps<u32>;
/// Ramps with 64-bit stops.
pub type GammaRamps64 = GammaRamps<u64>;
/// Ramps with `f32` stops.
pub type GammaRampsF = GammaRamps<f32>;
/// Ramps with `f64` stops.
pub type GammaRampsD = GammaRamps<f64>;

impl<T: RampElement> GammaRamps<T> {
    /// Allocates zeroed ramps with the given channel sizes.
    ///
    /// # Errors
    ///
    /// `ENOMEM` if the total size overflows or cannot be allocated.
    pub fn new(red_size: usize, green_size: usize, blue_size: usize) -> Result<Self> {
        let native = gamma_ramps_initialise(red_size, green_size, blue_size).map_err(create_error)?;
        Ok(Self { native })
    }

    /// Adopts ramps the native layer already allocated.
    pub fn from_native(native: NativeRamps<T>) -> Self {
        Self { native }
    }

    /// Gives the allocation back to the native layer.
    pub fn into_native(self) -> NativeRamps<T> {
        self.native
    }

    /// Depth tag of the element type: bits for integers, `-1` for `f32`, `-2` for `f64`.
    pub fn depth(&self) -> i32 {
        T::DEPTH
    }

    /// Stops in the red channel.
    pub fn red_size(&self) -> usize {
        self.native.red_size()
    }

    /// Stops in the green channel.
    pub fn green_size(&self) -> usize {
        self.native.green_size()
    }

    /// Stops in the blue channel.
    pub fn blue_size(&self) -> usize {
        self.native.blue_size()
    }

    /// The red channel.
    pub fn red(&self) -> Ramp<'_, T> {
        Ramp { values: self.native.channels().0 }
    }

    /// The green channel.
    pub fn green(&self) -> Ramp<'_, T> {
        Ramp { values: self.native.channels().1 }
    }

    /// The blue channel.
    pub fn blue(&self) -> Ramp<'_, T> {
        Ramp { values: self.native.channels().2 }
    }

    /// The red channel, mutably.
    pub fn red_mut(&mut self) -> &mut [T] {
        self.native.channels_mut().0
    }

    /// The green channel, mutably.
    pub fn green_mut(&mut self) -> &mut [T] {
        self.native.channels_mut().1
    }

    /// The blue channel, mutably.
    pub fn blue_mut(&mut self) -> &mut [T] {
        self.native.channels_mut().2
    }

    /// All three channels, mutably.
    pub fn channels_mut(&mut self) -> (&mut [T], &mut [T], &mut [T]) {
        self.native.channels_mut()
    }

    /// Fills every channel from `curve`, sampled evenly over `[0, 1]`.
    ///
    /// Results outside `[0, 1]` are clamped for integer stops.
    pub fn fill_with(&mut self, curve: impl Fn(f64) -> f64) {
        let (red, green, blue) = self.native.channels_mut();
        for channel in [red, green, blue] {
            let last = channel.len().saturating_sub(1).max(1) as f64;
            for (i, stop) in channel.iter_mut().enumerate() {
                *stop = T::from_unit(curve(i as f64 / last));
            }
        }
        trace!(depth = T::DEPTH, "filled gamma ramps");
    }

    /// Fills every channel with the identity curve.
    pub fn fill_identity(&mut self) {
        self.fill_with(|x| x);
    }

    pub(crate) fn native(&self) -> &NativeRamps<T> {
        &self.native
    }

    pub(crate) fn native_mut(&mut self) -> &mut NativeRamps<T> {
        &mut self.native
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_u16() {
        let ramps = GammaRamps16::new(4, 4, 4).unwrap();
        assert_eq!(ramps.depth(), 16);
        assert_eq!(ramps.red().size(), 4);
        assert_eq!(ramps.green().size(), 4);
        assert_eq!(ramps.blue().size(), 4);
        assert!(ramps.red().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_adopt_native_block() {
        let native = gamma_ramps_initialise::<u32>(3, 5, 2).unwrap();
        let mut ramps = GammaRamps32::from_native(native);
        assert_eq!(ramps.depth(), 32);
        assert_eq!((ramps.red().size(), ramps.green().size(), ramps.blue().size()), (3, 5, 2));

        ramps.blue_mut().fill(9);
        let native = ramps.into_native();
        assert_eq!(native.channels().2, &[9, 9]);
    }

    #[test]
    fn test_depth_per_alias() {
        assert_eq!(GammaRamps8::new(1, 1, 1).unwrap().depth(), 8);
        assert_eq!(GammaRamps32::new(1, 1, 1).unwrap().depth(), 32);
        assert_eq!(GammaRamps64::new(1, 1, 1).unwrap().depth(), 64);
        assert_eq!(GammaRampsF::new(1, 1, 1).unwrap().depth(), -1);
        assert_eq!(GammaRampsD::new(1, 1, 1).unwrap().depth(), -2);
    }

    #[test]
    fn test_channels_are_independent() {
        let mut ramps = GammaRamps8::new(2, 3, 1).unwrap();
        ramps.green_mut().fill(7);
        assert_eq!(&*ramps.red(), &[0, 0]);
        assert_eq!(&*ramps.green(), &[7, 7, 7]);
        assert_eq!(&*ramps.blue(), &[0]);
    }

    #[test]
    fn test_fill_identity() {
        let mut ramps = GammaRamps16::new(3, 2, 5).unwrap();
        ramps.fill_identity();
        assert_eq!(&*ramps.red(), &[0, 32768, u16::MAX]);
        assert_eq!(&*ramps.green(), &[0, u16::MAX]);
        assert_eq!(ramps.blue()[4], u16::MAX);
    }

    #[test]
    fn test_fill_with_curve() {
        let mut ramps = GammaRampsD::new(5, 5, 5).unwrap();
        ramps.fill_with(|x| x.powf(2.2));
        assert_relative_eq!(ramps.red()[2], 0.5f64.powf(2.2));
        assert_relative_eq!(ramps.blue()[4], 1.0);
    }

    #[test]
    fn test_overflow_is_enomem() {
        let err = GammaRamps64::new(usize::MAX, usize::MAX, 2).unwrap_err();
        assert_eq!(err.code(), libc::ENOMEM);
    }
}
