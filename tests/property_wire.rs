// tests/property_wire.rs

use fswire::codec::{Encode, NetstringReader, decode, decode_exact};
use fswire::flags::{CreateFlags, EventFlags, FlagFamily};
use fswire_test_utils::strategies;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_value_decode_inverts_encode(value in strategies::value()) {
        let bytes = value.encode();
        prop_assert_eq!(decode_exact(&bytes).unwrap(), value);
    }

    #[test]
    fn test_decode_consumes_exactly_one_unit(
        first in strategies::value(),
        second in strategies::value(),
    ) {
        let mut bytes = first.encode();
        let split = bytes.len();
        second.encode_into(&mut bytes);

        let (decoded, used) = decode(&bytes).unwrap();
        prop_assert_eq!(used, split);
        prop_assert_eq!(decoded, first);
    }

    #[test]
    fn test_reader_matches_slice_decoder(values in prop::collection::vec(strategies::value(), 0..6)) {
        let mut bytes = Vec::new();
        for value in &values {
            value.encode_into(&mut bytes);
            bytes.push(b'\n');
        }
        let read: Vec<_> = NetstringReader::new(&bytes[..])
            .collect::<Result<_, _>>()
            .unwrap();
        prop_assert_eq!(read, values);
    }

    #[test]
    fn test_event_flags_text_round_trip(flags in strategies::event_flags()) {
        let text = flags.format();
        prop_assert_eq!(EventFlags::parse(&text).unwrap(), flags);
        prop_assert_eq!(flags.names().len(), flags.iter().count());
    }

    #[test]
    fn test_create_flags_text_round_trip(flags in strategies::create_flags()) {
        prop_assert_eq!(CreateFlags::parse(&flags.format()).unwrap(), flags);
    }

    #[test]
    fn test_raw_bits_survive_wire_form(bits in any::<u32>()) {
        let decoded = decode_exact(&EventFlags::from_raw(bits).encode()).unwrap();
        prop_assert_eq!(
            decoded.get("cflag").and_then(|v| v.as_integer()),
            Some(i128::from(bits))
        );
    }
}
