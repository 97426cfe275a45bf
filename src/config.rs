// Centralized defaults for particle parameters, sweeps and noise kernels

// ====================
// Suspending medium
// ====================
pub const DEFAULT_BUFFER_PERM: f64 = 78.0;
pub const DEFAULT_BUFFER_COND: f64 = 0.01; // S/m

// ====================
// Core / homogeneous particle
// ====================
pub const DEFAULT_CORE_PERM: f64 = 50.0;
pub const DEFAULT_CORE_COND: f64 = 0.1; // S/m
pub const DEFAULT_CORE_RADIUS: f64 = 10.0; // µm

// ====================
// Shell placeholders
// ====================
// Values used when a curve file only describes a simpler model
pub const DEFAULT_FIRST_SHELL_PERM: f64 = 40.0;
pub const DEFAULT_FIRST_SHELL_COND: f64 = 0.00001;
pub const DEFAULT_FIRST_SHELL_THICK: f64 = 6.0;
pub const DEFAULT_SECOND_SHELL_PERM: f64 = 10.0;
pub const DEFAULT_SECOND_SHELL_COND: f64 = 0.00001;
pub const DEFAULT_SECOND_SHELL_THICK: f64 = 6.0;

/// Field gradient multiplier (∇|E|²)
pub const DEFAULT_FIELD_GRADIENT: f64 = 1.0;

// ====================
// Sweep
// ====================
pub const DEFAULT_SWEEP_START: f64 = 1.0;
pub const DEFAULT_SWEEP_STOP: f64 = 1000.0;
pub const DEFAULT_SWEEP_POINTS: usize = 200;

// ====================
// Noise kernels
// ====================
pub const DEFAULT_NOISE_STD_DEV: f64 = 0.05;
pub const DEFAULT_POISSON_SCALE: f64 = 1000.0;
pub const DEFAULT_FREQUENCY_NOISE_SCALE: f64 = 0.01;

// ====================
// Output
// ====================
pub const DEFAULT_OUTPUT_DIR: &str = "dep_results";
