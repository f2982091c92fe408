//! Property-based tests for conversion and record round-trips
//!
//! These verify that canonical strings convert back to the exact value for
//! every integer width, and that extract followed by apply with the
//! unmodified strings leaves a record of every scalar kind unchanged.

use fieldbind::{Binder, FieldInput, ParseMode, Record, Source, Target, Value};
use proptest::prelude::*;

macro_rules! integer_round_trip {
    ($($test:ident: $ty:ty => $tag:literal, $variant:ident;)*) => {
        proptest! {
            $(
                /// Property: the canonical decimal string of any value converts back to it.
                #[test]
                fn $test(n in any::<$ty>()) {
                    let binder = Binder::default();
                    prop_assert_eq!(binder.convert($tag, &n.to_string()), Ok(Value::$variant(n)));
                    prop_assert!(binder.validate("n", $tag, &n.to_string()).is_ok());
                }
            )*
        }
    };
}

integer_round_trip! {
    test_int_round_trip: isize => "int", Int;
    test_int8_round_trip: i8 => "int8", Int8;
    test_int16_round_trip: i16 => "int16", Int16;
    test_int32_round_trip: i32 => "int32", Int32;
    test_int64_round_trip: i64 => "int64", Int64;
    test_uint_round_trip: usize => "uint", Uint;
    test_uint8_round_trip: u8 => "uint8", Uint8;
    test_uint16_round_trip: u16 => "uint16", Uint16;
    test_uint32_round_trip: u32 => "uint32", Uint32;
    test_uint64_round_trip: u64 => "uint64", Uint64;
}

#[derive(Record, Debug, Clone, PartialEq)]
struct Sample {
    label: String,
    flag: bool,
    index: isize,
    small: i8,
    short: i16,
    medium: i32,
    wide: i64,
    size: usize,
    byte: u8,
    port: u16,
    count: u32,
    total: u64,
    gain: f32,
    ratio: f64,
    readings: Vec<i16>,
}

fn sample() -> impl Strategy<Value = Sample> {
    let text = (".*", any::<bool>());
    let signed = (any::<isize>(), any::<i8>(), any::<i16>(), any::<i32>(), any::<i64>());
    let unsigned = (any::<usize>(), any::<u8>(), any::<u16>(), any::<u32>(), any::<u64>());
    let floats = (
        prop::num::f32::NORMAL | prop::num::f32::SUBNORMAL | prop::num::f32::ZERO,
        prop::num::f64::NORMAL | prop::num::f64::ZERO,
        prop::collection::vec(any::<i16>(), 0..8),
    );
    (text, signed, unsigned, floats).prop_map(
        |(
            (label, flag),
            (index, small, short, medium, wide),
            (size, byte, port, count, total),
            (gain, ratio, readings),
        )| Sample {
            label,
            flag,
            index,
            small,
            short,
            medium,
            wide,
            size,
            byte,
            port,
            count,
            total,
            gain,
            ratio,
            readings,
        },
    )
}

proptest! {
    /// Property: extract then apply with every descriptor's own string rebuilds the record.
    #[test]
    fn test_record_round_trip(original in sample()) {
        let mut copy = original.clone();
        let fields = Binder::default()
            .extract::<(), _>(Source::Record(&original), |_| {})
            .unwrap();
        let report = fields
            .apply(Target::Record(&mut copy), |field| FieldInput::from(field.value_str()))
            .unwrap();
        prop_assert!(report.is_success(), "{:?}", report);
        prop_assert_eq!(copy, original);
    }

    /// Property: legacy mode wraps any i64 literal into the declared width like a cast.
    #[test]
    fn test_legacy_wraps_like_a_cast(n in any::<i64>()) {
        let binder = Binder::builder().parse_mode(ParseMode::Legacy).build();
        prop_assert_eq!(binder.convert("int8", &n.to_string()), Ok(Value::Int8(n as i8)));
        prop_assert_eq!(binder.convert("uint16", &n.to_string()), Ok(Value::Uint16(n as u16)));
    }
}

#[test]
fn test_sequence_examples() {
    let binder = Binder::default();
    assert_eq!(
        binder.convert("[]int", "[1 2 3]").unwrap().to_string(),
        "[1 2 3]"
    );
    assert_eq!(
        binder.convert("[]float64", "[1.5 2.5]").unwrap().to_string(),
        "[1.5 2.5]"
    );
}
