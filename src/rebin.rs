//! Integer rebinning of n-dimensional arrays by block averaging.
//!
//! A [`RebinSpec`] (usually produced by [`crate::subbinning`]) describes, per
//! axis, which window of fine bins to keep and how many neighbouring fine
//! bins collapse into one coarse bin. Merged bins are averaged.
//!
//! ```text
//! axis:    [ 0   1   2   3   4   5 ]      AxisRebin { start: 1, stop: 5, stride: 2 }
//! window:      [ 1   2   3   4 ]
//! result:      [ 1.5     3.5   ]
//! ```

use log::debug;
use ndarray::{ArrayBase, ArrayD, ArrayViewD, Axis, Data, Dimension, Slice};

use crate::binning::{AxisRebin, RebinSpec};
use crate::error::{BinningError, Result};

/// Rebin `array` by averaging merged bins.
///
/// Axes are processed from last to first. On each axis, everything outside
/// `[start, stop)` is discarded and every run of `stride` consecutive bins is
/// replaced by its mean, so the axis length becomes `(stop - start) / stride`.
/// The input is left untouched.
///
/// # Errors
///
/// [`BinningError::ShapeMismatch`] if the spec has a different number of
/// axes than the array, or if any window is empty, misaligned with its
/// stride, or extends past the end of its axis.
///
/// # Example
///
/// ```
/// use binmaps::{rebin, AxisRebin, RebinSpec};
/// use ndarray::array;
///
/// let spec = RebinSpec::new(vec![AxisRebin::new(1, 5, 2)]);
/// let out = rebin(&array![0.0, 1.0, 2.0, 3.0, 4.0, 5.0], &spec).unwrap();
/// assert_eq!(out.as_slice().unwrap(), &[1.5, 3.5]);
/// ```
pub fn rebin<S, D>(array: &ArrayBase<S, D>, spec: &RebinSpec) -> Result<ArrayD<f64>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    if spec.len() != array.ndim() {
        return Err(BinningError::ShapeMismatch(format!(
            "rebin spec has {} axes but array has {} dimensions",
            spec.len(),
            array.ndim()
        )));
    }

    let mut current = array.view().into_dyn().to_owned();
    for (axis, window) in spec.iter().enumerate().rev() {
        let n_bins = check_window(window, axis, current.len_of(Axis(axis)))?;
        debug!(
            "rebin: axis {axis} {} -> {n_bins} bins (stride {})",
            current.len_of(Axis(axis)),
            window.stride
        );
        current = average_axis(current.view(), Axis(axis), window);
    }
    Ok(current)
}

/// Validate `window` against an axis of length `len`; returns the coarse bin count.
fn check_window(window: &AxisRebin, axis: usize, len: usize) -> Result<usize> {
    let AxisRebin {
        start,
        stop,
        stride,
    } = *window;

    let problem = if stride == 0 {
        Some("stride must be at least 1".to_string())
    } else if start >= stop {
        Some(format!("empty window [{start}, {stop})"))
    } else if stop > len {
        Some(format!("window end {stop} exceeds axis length {len}"))
    } else if (stop - start) % stride != 0 {
        Some(format!(
            "window length {} is not a multiple of stride {stride}",
            stop - start
        ))
    } else {
        None
    };

    match problem {
        Some(problem) => Err(BinningError::ShapeMismatch(format!("axis {axis}: {problem}"))),
        None => Ok((stop - start) / stride),
    }
}

/// Average the `stride` interleaved slices of the window along `axis`.
fn average_axis(view: ArrayViewD<'_, f64>, axis: Axis, window: &AxisRebin) -> ArrayD<f64> {
    let interleaved = |offset: usize| {
        view.slice_axis(
            axis,
            Slice::new(
                (window.start + offset) as isize,
                Some(window.stop as isize),
                window.stride as isize,
            ),
        )
    };

    let mut acc = interleaved(0).to_owned();
    for offset in 1..window.stride {
        acc += &interleaved(offset);
    }
    acc /= window.stride as f64;
    acc
}
