//! Pixel stages run after geometric placement, in pipeline order: color, glitch, scanlines,
//! symmetry, overlay.

/// Separable gaussian blur on coverage masks.
pub mod blur;
/// Brand gradient map with stochastic accents.
pub mod color;
/// Straight-alpha blend kernels.
pub mod composite;
/// The vector emblem and its rasterization.
pub mod emblem;
/// Strip smear and slice displacement.
pub mod glitch;
/// Emblem compositing modes.
pub mod overlay;
/// Periodic darkening bands.
pub mod scanlines;
/// Mirror and radial tilings.
pub mod symmetry;
