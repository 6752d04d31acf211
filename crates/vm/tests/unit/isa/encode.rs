//! Record Encoding Tests.
//!
//! The encoder is the inverse of the decoder: for records in canonical form
//! (unused fields zero) decode followed by encode reproduces the hex text.

use ldvm_core::common::{BitAddr, IntAddr, JumpTarget};
use ldvm_core::isa::decode::{decode, decode_line, parse_hex};
use ldvm_core::isa::encode::{encode, encode_line, record_to_hex};
use ldvm_core::isa::{ArithOp, Instruction, Record};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn encode_writes_lowercase_little_endian() {
    let inst = Instruction::SetInt {
        dst: IntAddr(0x12),
        value: -2,
    };
    assert_eq!(encode_line(&inst), "0400120000000000feff");
}

#[test]
fn encode_stores_target_minus_one() {
    let inst = Instruction::JumpIfBitClear {
        bit: BitAddr(1),
        target: JumpTarget::from_encoded(7),
    };
    let rec = encode(&inst);
    assert_eq!(rec.name3, 7);
    assert_eq!(rec.op, 50);
}

#[test]
fn encode_zeroes_unused_fields() {
    let rec = encode(&Instruction::EndOfProgram);
    assert_eq!(
        rec,
        Record {
            op: 255,
            ..Record::default()
        }
    );
}

#[test]
fn compiler_records_round_trip() {
    for line in [
        "01000200000000000000",
        "04000000000000000500",
        "07000100020003000000",
        "32000200000007000000",
        "34000000000003000a00",
        "3c000000000006000000",
        "ff000000000000000000",
    ] {
        let inst = decode_line(line).unwrap();
        assert_eq!(encode_line(&inst), line);
    }
}

fn arb_instruction() -> impl Strategy<Value = Instruction> {
    let bit = any::<u16>().prop_map(BitAddr);
    let int = any::<u16>().prop_map(IntAddr);
    let target = any::<u16>().prop_map(JumpTarget::from_encoded);
    let op = prop_oneof![
        Just(ArithOp::Add),
        Just(ArithOp::Sub),
        Just(ArithOp::Mul),
        Just(ArithOp::Div)
    ];
    let data = prop_oneof![
        bit.clone().prop_map(|bit| Instruction::SetBit { bit }),
        bit.clone().prop_map(|bit| Instruction::ClearBit { bit }),
        (bit.clone(), bit.clone()).prop_map(|(dst, src)| Instruction::CopyBit { dst, src }),
        (int.clone(), any::<i16>()).prop_map(|(dst, value)| Instruction::SetInt { dst, value }),
        (int.clone(), int.clone()).prop_map(|(dst, src)| Instruction::CopyInt { dst, src }),
        int.clone().prop_map(|var| Instruction::IncrementInt { var }),
        (op, int.clone(), int.clone(), int.clone())
            .prop_map(|(op, dst, lhs, rhs)| Instruction::Arith { op, dst, lhs, rhs }),
    ];
    let control = prop_oneof![
        (bit.clone(), target.clone())
            .prop_map(|(bit, target)| Instruction::JumpIfBitClear { bit, target }),
        (bit, target.clone()).prop_map(|(bit, target)| Instruction::JumpIfBitSet { bit, target }),
        (int.clone(), any::<i16>(), target.clone()).prop_map(|(var, literal, target)| {
            Instruction::JumpUnlessLess {
                var,
                literal,
                target,
            }
        }),
        (int.clone(), int.clone(), target.clone())
            .prop_map(|(lhs, rhs, target)| Instruction::JumpUnlessEqual { lhs, rhs, target }),
        (int.clone(), int, target.clone())
            .prop_map(|(lhs, rhs, target)| Instruction::JumpUnlessGreater { lhs, rhs, target }),
        target.prop_map(|target| Instruction::Jump { target }),
        Just(Instruction::EndOfProgram),
    ];
    prop_oneof![data, control]
}

proptest! {
    #[test]
    fn instruction_survives_encode_decode(inst in arb_instruction()) {
        prop_assert_eq!(decode(&encode(&inst)), Ok(inst));
    }

    #[test]
    fn canonical_hex_is_byte_identical(inst in arb_instruction()) {
        let hex = encode_line(&inst);
        let rec = Record::from_bytes(&parse_hex(&hex).unwrap());
        prop_assert_eq!(record_to_hex(&rec), hex);
    }

    #[test]
    fn record_bytes_round_trip(bytes in any::<[u8; 10]>()) {
        prop_assert_eq!(Record::from_bytes(&bytes).to_bytes(), bytes);
    }
}
