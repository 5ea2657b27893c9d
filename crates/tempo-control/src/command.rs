//! Control payload decode
//!
//! The control channel carries a bare sequence of little-endian IEEE-754
//! 32-bit speed factors, back to back, with no header or delimiter. One read
//! may deliver several values when the controller writes faster than the
//! engine consumes; such a batch collapses to its last complete value. The
//! channel carries a latest state, not a queue of discrete events.

/// Read buffer capacity in command slots.
pub const COMMAND_SLOTS: usize = 512;

/// Encoded size of one command in bytes.
pub const COMMAND_SIZE: usize = std::mem::size_of::<f32>();

/// Encode one absolute speed factor.
#[inline]
pub fn encode_command(factor: f32) -> [u8; COMMAND_SIZE] {
    factor.to_le_bytes()
}

/// Effective command of one batch: the last complete value.
///
/// Earlier values in the batch are superseded and silently dropped. A
/// trailing partial value is ignored, and a batch shorter than one command
/// yields nothing.
pub fn latest_command(batch: &[u8]) -> Option<f32> {
    let complete = batch.len() / COMMAND_SIZE;
    if complete == 0 {
        return None;
    }
    let start = (complete - 1) * COMMAND_SIZE;
    let bytes = batch[start..start + COMMAND_SIZE].try_into().ok()?;
    Some(f32::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn batch_of(factors: &[f32]) -> Vec<u8> {
        factors
            .iter()
            .flat_map(|f| encode_command(*f))
            .collect()
    }

    #[test]
    fn test_empty_batch_yields_nothing() {
        assert_eq!(latest_command(&[]), None);
        assert_eq!(latest_command(&[0x00, 0x00, 0x80]), None);
    }

    #[test]
    fn test_single_command() {
        assert_eq!(latest_command(&batch_of(&[2.5])), Some(2.5));
    }

    #[test]
    fn test_batch_collapses_to_last_value() {
        assert_eq!(latest_command(&batch_of(&[2.0, 3.0, 5.0])), Some(5.0));
    }

    #[test]
    fn test_trailing_partial_value_is_ignored() {
        let mut batch = batch_of(&[2.0, 3.0]);
        batch.push(0x41);
        assert_eq!(latest_command(&batch), Some(3.0));
    }

    #[test]
    fn test_negative_factor_decodes() {
        // Rejection is the registry's policy; the decode stays transparent.
        assert_eq!(latest_command(&batch_of(&[-1.0])), Some(-1.0));
    }

    #[test]
    fn test_roundtrip() {
        for factor in [0.0f32, 0.25, 1.0, 64.0] {
            assert_eq!(latest_command(&encode_command(factor)), Some(factor));
        }
    }

    proptest! {
        #[test]
        fn any_batch_yields_its_last_value(
            factors in prop::collection::vec(0.0f32..1000.0, 1..COMMAND_SLOTS),
        ) {
            let batch = batch_of(&factors);
            prop_assert_eq!(latest_command(&batch), factors.last().copied());
        }
    }
}
