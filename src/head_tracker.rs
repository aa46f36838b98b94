//! A head tracking session driven by sensor callbacks and queried by a render loop.

mod gl;

use crate::clock::Clock;
use crate::ekf::{OrientationEkf, TrackingState};
use crate::head_tracker::gl::GlMatrix;
use crate::scalar::Real;
use crate::types::{AccelerometerReading, GyroscopeBias, GyroscopeReading};
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Distance from the neck pivot to the eyes along the viewing direction, in meters.
const NECK_HORIZONTAL_OFFSET: f64 = 0.08;

/// Height of the eyes above the neck pivot, in meters.
const NECK_VERTICAL_OFFSET: f64 = 0.075;

/// Default extrapolation beyond the last gyroscope event, one frame at 30 Hz.
const DEFAULT_PREDICTION_LEAD: f64 = 1.0 / 30.0;

/// The rotation of the display relative to the device's natural orientation.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum DisplayRotation {
    #[default]
    Rotation0,
    Rotation90,
    Rotation180,
    Rotation270,
}

impl DisplayRotation {
    /// Gets the counter-clockwise rotation, in degrees.
    pub fn degrees(&self) -> f64 {
        match self {
            DisplayRotation::Rotation0 => 0.0,
            DisplayRotation::Rotation90 => 90.0,
            DisplayRotation::Rotation180 => 180.0,
            DisplayRotation::Rotation270 => 270.0,
        }
    }
}

struct SessionState<T> {
    filter: OrientationEkf<T>,
    /// Clock time of the most recent gyroscope event.
    last_gyro_clock_ns: Option<i64>,
}

/// Tracks the orientation of a head-mounted phone.
///
/// Sensor callbacks ([`on_gyroscope`](Self::on_gyroscope),
/// [`on_accelerometer`](Self::on_accelerometer)) and render queries
/// ([`last_head_view`](Self::last_head_view)) take `&self` and may run on different threads.
/// Updates are mutually exclusive; queries may run concurrently with each other.
pub struct HeadTracker<T, C> {
    clock: C,
    state: RwLock<SessionState<T>>,
    tracking: AtomicBool,
    gyro_bias: GyroscopeBias<T>,
    display_rotation: DisplayRotation,
    neck_model_enabled: bool,
    prediction_lead: T,
}

impl<T, C> HeadTracker<T, C>
where
    T: Real,
    C: Clock,
{
    /// Initializes a new, stopped [`HeadTracker`].
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            state: RwLock::new(SessionState {
                filter: OrientationEkf::new(),
                last_gyro_clock_ns: None,
            }),
            tracking: AtomicBool::new(false),
            gyro_bias: GyroscopeBias::new(T::zero(), T::zero(), T::zero()),
            display_rotation: DisplayRotation::default(),
            neck_model_enabled: false,
            prediction_lead: T::literal(DEFAULT_PREDICTION_LEAD),
        }
    }

    /// Sets the bias subtracted from every gyroscope reading.
    pub fn set_gyro_bias(&mut self, bias: GyroscopeBias<T>) {
        self.gyro_bias = bias;
    }

    /// Sets the rotation of the display.
    pub fn set_display_rotation(&mut self, rotation: DisplayRotation) {
        self.display_rotation = rotation;
    }

    /// Enables or disables the translation of the eyes around the neck pivot.
    pub fn set_neck_model_enabled(&mut self, enabled: bool) {
        self.neck_model_enabled = enabled;
    }

    /// Sets the time, in seconds, to extrapolate beyond the current time.
    pub fn set_prediction_lead(&mut self, seconds: T) {
        self.prediction_lead = seconds;
    }

    /// Resets the filter and starts accepting samples. Does nothing if already tracking.
    pub fn start_tracking(&self) {
        // Samples that see the flag set must wait for the reset.
        let mut state = self.write_state();
        if self
            .tracking
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        state.filter.reset();
        state.last_gyro_clock_ns = None;
        info!("Head tracking started");
    }

    /// Stops accepting samples. Does nothing if not tracking.
    pub fn stop_tracking(&self) {
        if self.tracking.swap(false, Ordering::AcqRel) {
            info!("Head tracking stopped");
        }
    }

    /// Determines whether samples are being accepted.
    pub fn is_tracking(&self) -> bool {
        self.tracking.load(Ordering::Acquire)
    }

    /// Gets the state of the underlying filter.
    pub fn tracking_state(&self) -> TrackingState {
        self.read_state().filter.state()
    }

    /// Gets a snapshot of the underlying filter.
    pub fn filter(&self) -> OrientationEkf<T> {
        self.read_state().filter.clone()
    }

    /// Handles a gyroscope sample. Ignored unless tracking.
    ///
    /// ## Arguments
    /// * `reading` - The raw angular rate, in rad/s. The configured bias is removed.
    /// * `timestamp_ns` - The sensor timestamp, in nanoseconds.
    pub fn on_gyroscope(&self, reading: &GyroscopeReading<T>, timestamp_ns: i64) {
        if !self.is_tracking() {
            return;
        }

        let reading = *reading - self.gyro_bias;
        let mut state = self.write_state();
        state.last_gyro_clock_ns = Some(self.clock.nanos());
        state.filter.process_gyroscope(&reading, timestamp_ns);
    }

    /// Handles an accelerometer sample. Ignored unless tracking.
    pub fn on_accelerometer(&self, reading: &AccelerometerReading<T>, timestamp_ns: i64) {
        if !self.is_tracking() {
            return;
        }

        self.write_state()
            .filter
            .process_accelerometer(reading, timestamp_ns);
    }

    /// Gets the predicted head view as a column-major 4×4 OpenGL matrix.
    ///
    /// The orientation is extrapolated from the last gyroscope event to the current time
    /// plus the prediction lead and expressed in display coordinates.
    pub fn last_head_view(&self) -> [T; 16] {
        let rotation = T::literal(self.display_rotation.degrees());
        let sensor_to_display = gl::rotate_euler(T::zero(), T::zero(), -rotation);
        let ekf_to_head_tracker = gl::rotate_euler(T::literal(-90.0), T::zero(), rotation);

        let predicted = {
            let state = self.read_state();
            let since_last_gyro = state
                .last_gyro_clock_ns
                .map(|last| T::nanos_to_seconds(self.clock.nanos().saturating_sub(last)))
                .unwrap_or_else(T::zero);
            state
                .filter
                .predicted_gl_matrix(since_last_gyro + self.prediction_lead)
        };

        let head_view = gl::multiply(
            &gl::multiply(&sensor_to_display, &predicted),
            &ekf_to_head_tracker,
        );

        if self.neck_model_enabled {
            Self::apply_neck_model(&head_view)
        } else {
            head_view
        }
    }

    fn apply_neck_model(head_view: &GlMatrix<T>) -> GlMatrix<T> {
        let vertical = T::literal(NECK_VERTICAL_OFFSET);

        let mut neck = gl::identity();
        gl::translate(
            &mut neck,
            T::zero(),
            -vertical,
            T::literal(NECK_HORIZONTAL_OFFSET),
        );

        let mut result = gl::multiply(&neck, head_view);
        gl::translate(&mut result, T::zero(), vertical, T::zero());
        result
    }

    fn read_state(&self) -> RwLockReadGuard<'_, SessionState<T>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState<T>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
