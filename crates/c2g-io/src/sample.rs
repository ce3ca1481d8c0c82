//! Conversions between stored integer samples and normalized floats.

/// 8-bit sample to `[0, 1]`.
#[inline]
pub(crate) fn from_u8(v: u8) -> f32 {
    v as f32 / 255.0
}

/// 16-bit sample to `[0, 1]`.
#[inline]
pub(crate) fn from_u16(v: u16) -> f32 {
    v as f32 / 65535.0
}

/// `[0, 1]` to the nearest 8-bit code. Out-of-range input is clamped.
#[inline]
pub(crate) fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// `[0, 1]` to the nearest 16-bit code. Out-of-range input is clamped.
#[inline]
pub(crate) fn to_u16(v: f32) -> u16 {
    (v.clamp(0.0, 1.0) * 65535.0).round() as u16
}

/// Big-endian byte pairs to 16-bit samples.
pub(crate) fn be_bytes_to_u16(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
        .collect()
}

/// Naive CMYK to RGB on normalized samples, four in, three out.
///
/// Ignores any embedded ICC profile; the result is only good enough to
/// look at, not to convert.
pub(crate) fn cmyk_to_rgb(cmyk: &[f32]) -> Vec<f32> {
    cmyk.chunks_exact(4)
        .flat_map(|px| {
            let k = 1.0 - px[3];
            [(1.0 - px[0]) * k, (1.0 - px[1]) * k, (1.0 - px[2]) * k]
        })
        .collect()
}
