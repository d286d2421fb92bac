use crate::error::{EcgError, Result};
use crate::recording::Recording;

/// Signal-to-noise ratio in dB between a clean and a noisy recording.
///
/// The noise is `noisy - clean` taken over both the time and amplitude
/// columns; the L2 norm runs over the flattened `[time, amplitude]` array.
/// Returns `+inf` when the two recordings are identical.
pub fn signal_to_noise(clean: &Recording, noisy: &Recording) -> Result<f64> {
    if clean.len() != noisy.len() {
        return Err(EcgError::ShapeMismatch {
            left: clean.len(),
            right: noisy.len(),
        });
    }

    let mut signal_energy = 0.0;
    let mut noise_energy = 0.0;
    let mut any_noise = false;
    for ((ct, ca), (nt, na)) in clean.samples().zip(noisy.samples()) {
        signal_energy += ct * ct + ca * ca;
        let dt = nt - ct;
        let da = na - ca;
        any_noise |= dt != 0.0 || da != 0.0;
        noise_energy += dt * dt + da * da;
    }

    if !any_noise {
        return Ok(f64::INFINITY);
    }

    Ok(20.0 * (signal_energy.sqrt() / noise_energy.sqrt()).log10())
}
