//! Gamma ramp storage.
//!
//! The three channels of a ramp set live in one contiguous allocation:
//! red first, then green, then blue. The red channel starts at offset zero
//! and is the handle the allocation is released through. The other two are
//! offsets into the same block.

use tracing::trace;

/// An element type that gamma ramps can be stored in.
///
/// Integer elements span their full range, floating point elements span
/// `[0, 1]`.
pub trait RampElement: Copy + Default + PartialEq + std::fmt::Debug + Send + Sync + 'static {
    /// Ramp depth tag: the bit width for integers, `-1` for `f32`, `-2` for `f64`.
    const DEPTH: i32;

    /// Converts a normalised value in `[0, 1]` to this element type.
    fn from_unit(value: f64) -> Self;

    /// Converts this element to a normalised value in `[0, 1]`.
    fn to_unit(self) -> f64;
}

macro_rules! int_element {
    ($t:ty, $depth:expr) => {
        impl RampElement for $t {
            const DEPTH: i32 = $depth;

            #[inline]
            fn from_unit(value: f64) -> Self {
                (value.clamp(0.0, 1.0) * <$t>::MAX as f64).round() as $t
            }

            #[inline]
            fn to_unit(self) -> f64 {
                self as f64 / <$t>::MAX as f64
            }
        }
    };
}

int_element!(u8, 8);
int_element!(u16, 16);
int_element!(u32, 32);
int_element!(u64, 64);

impl RampElement for f32 {
    const DEPTH: i32 = -1;

    #[inline]
    fn from_unit(value: f64) -> Self {
        value as f32
    }

    #[inline]
    fn to_unit(self) -> f64 {
        self as f64
    }
}

impl RampElement for f64 {
    const DEPTH: i32 = -2;

    #[inline]
    fn from_unit(value: f64) -> Self {
        value
    }

    #[inline]
    fn to_unit(self) -> f64 {
        self
    }
}

/// A set of gamma ramps in one allocation.
///
/// Produced by [`gamma_ramps_initialise`]. Ownership of the block moves
/// with the value. It is released when the value is dropped.
#[derive(Debug)]
pub struct NativeRamps<T: RampElement> {
    buffer: Box<[T]>,
    red_size: usize,
    green_size: usize,
    blue_size: usize,
}

impl<T: RampElement> NativeRamps<T> {
    /// Size of the red channel.
    pub fn red_size(&self) -> usize {
        self.red_size
    }

    /// Size of the green channel.
    pub fn green_size(&self) -> usize {
        self.green_size
    }

    /// Size of the blue channel.
    pub fn blue_size(&self) -> usize {
        self.blue_size
    }

    /// Splits the value into its allocation and channel sizes.
    pub fn into_parts(self) -> (Box<[T]>, [usize; 3]) {
        (self.buffer, [self.red_size, self.green_size, self.blue_size])
    }

    /// Returns the three channels.
    pub fn channels(&self) -> (&[T], &[T], &[T]) {
        let (red, rest) = self.buffer.split_at(self.red_size);
        let (green, blue) = rest.split_at(self.green_size);
        (red, green, blue)
    }

    /// Returns the three channels mutably.
    pub fn channels_mut(&mut self) -> (&mut [T], &mut [T], &mut [T]) {
        let (red, rest) = self.buffer.split_at_mut(self.red_size);
        let (green, blue) = rest.split_at_mut(self.green_size);
        (red, green, blue)
    }
}

/// Allocates zeroed storage for ramps of the given channel sizes.
///
/// Fails with `ENOMEM` when the total size overflows or the allocation
/// cannot be satisfied.
pub fn gamma_ramps_initialise<T: RampElement>(
    red_size: usize,
    green_size: usize,
    blue_size: usize,
) -> Result<NativeRamps<T>, i32> {
    let total = red_size
        .checked_add(green_size)
        .and_then(|n| n.checked_add(blue_size))
        .ok_or(libc::ENOMEM)?;

    let mut storage: Vec<T> = Vec::new();
    storage.try_reserve_exact(total).map_err(|_| libc::ENOMEM)?;
    storage.resize(total, T::default());

    trace!(depth = T::DEPTH, red_size, green_size, blue_size, "allocated gamma ramps");
    Ok(NativeRamps {
        buffer: storage.into_boxed_slice(),
        red_size,
        green_size,
        blue_size,
    })
}
