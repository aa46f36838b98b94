// Enable no_std mode.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
// Only enables the `doc_cfg` feature when the `docsrs` configuration attribute is defined.
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Head orientation tracking for phone-based VR viewers.
//!
//! [`OrientationEkf`] fuses gyroscope and accelerometer samples into a rotation estimate
//! on SO(3) and extrapolates it to the time a frame is drawn. [`Distortion`] models the
//! radial distortion of the viewer's lenses. With the `std` feature, [`HeadTracker`]
//! wraps the filter into a thread-safe session fed by sensor callbacks.

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("Either the `std` or the `libm` feature must be enabled");

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
mod clock;
#[cfg(feature = "alloc")]
mod distortion;
pub mod ekf;
#[cfg(feature = "std")]
mod head_tracker;
mod macros;
mod scalar;
pub mod so3;
pub mod types;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub use crate::clock::{Clock, SystemClock};
#[cfg(feature = "alloc")]
#[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
pub use crate::distortion::{Distortion, DistortionError};
pub use crate::ekf::{ObservationModel, OrientationEkf, TrackingState};
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub use crate::head_tracker::{DisplayRotation, HeadTracker};
pub use crate::scalar::Real;
