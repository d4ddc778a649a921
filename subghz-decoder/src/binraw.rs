//! BinRAW run-length decoding
//!
//! A BinRAW payload stores the signal as packed bits: every bit is one time
//! element (TE) of constant level. Decoding expands the hex bytes MSB first and
//! turns every run of equal bits into one signed duration, positive for ones
//! and negative for zeros.

use crate::types::{DecoderError, Result, Timing, TimingSequence};

/// Decode a hex payload into a timing sequence.
///
/// # Arguments
/// * `payload` - two-character hex tokens, one byte each
/// * `time_unit` - microseconds per bit, must be positive
/// * `bit_count` - keep only this many leading bits; `None` keeps all
///
/// # Example
/// ```
/// use subghz_decoder::binraw;
///
/// let timings = binraw::decode(&["0F"], 10, None).unwrap();
/// assert_eq!(timings, vec![-40, 40]);
/// ```
pub fn decode<S: AsRef<str>>(
    payload: &[S],
    time_unit: i64,
    bit_count: Option<usize>,
) -> Result<TimingSequence> {
    if time_unit <= 0 {
        return Err(DecoderError::InvalidArgument(format!(
            "time unit must be positive, got {}",
            time_unit
        )));
    }

    let bytes = payload_bytes(payload)?;
    let total_bits = bytes.len() * 8;
    let limit = bit_count.map_or(total_bits, |count| count.min(total_bits));

    log::debug!(
        "Expanding {} bytes ({} of {} bits) with TE={}us",
        bytes.len(),
        limit,
        total_bits,
        time_unit
    );

    let mut bits = bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
        .take(limit);

    let Some(mut level) = bits.next() else {
        return Ok(Vec::new());
    };
    let mut run: i64 = 1;
    let mut timings = Vec::new();

    for bit in bits {
        if bit == level {
            run += 1;
        } else {
            timings.push(duration(run, level, time_unit)?);
            level = bit;
            run = 1;
        }
    }
    timings.push(duration(run, level, time_unit)?);

    Ok(timings)
}

fn duration(run: i64, level: bool, time_unit: i64) -> Result<Timing> {
    let magnitude = run.checked_mul(time_unit).ok_or_else(|| {
        DecoderError::InvalidArgument(format!(
            "run of {} bits at TE={} overflows a duration",
            run, time_unit
        ))
    })?;
    Ok(if level { magnitude } else { -magnitude })
}

fn payload_bytes<S: AsRef<str>>(payload: &[S]) -> Result<Vec<u8>> {
    payload
        .iter()
        .map(|token| {
            let token = token.as_ref();
            let mut byte = [0u8; 1];
            if token.len() != 2 || hex::decode_to_slice(token, &mut byte).is_err() {
                return Err(DecoderError::InvalidArgument(format!(
                    "not a hex byte: {:?}",
                    token
                )));
            }
            Ok(byte[0])
        })
        .collect()
}
