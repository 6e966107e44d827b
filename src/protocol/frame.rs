//! Fixed-size framing of JSON payloads.
//!
//! Every message travels as one `MAX_MSG_SIZE` byte buffer. The JSON text
//! occupies the front of the buffer and the rest is NUL bytes.

use crate::config::MAX_MSG_SIZE;

/// Longest payload that still leaves room for a terminating NUL.
pub const MAX_PAYLOAD: usize = MAX_MSG_SIZE - 1;

/// Copy `payload` into a zero-padded frame, truncating it to [`MAX_PAYLOAD`] bytes.
pub fn pad_frame(payload: &[u8]) -> [u8; MAX_MSG_SIZE] {
    let mut frame = [0u8; MAX_MSG_SIZE];
    let len = payload.len().min(MAX_PAYLOAD);
    frame[..len].copy_from_slice(&payload[..len]);
    frame
}

/// The payload carried by a received frame: everything before the first NUL.
pub fn strip_padding(frame: &[u8]) -> &[u8] {
    let end = frame.iter().position(|&b| b == 0).unwrap_or(frame.len());
    &frame[..end]
}
