//! Common test utilities and fixtures.
//!
//! Shared type constants and helpers for driving coercions to completion
//! and inspecting the errors they produce.

#![allow(dead_code)]

use abi_wrap::{
    BigDecimal, BytesType, BytesValue, DecimalType, DecimalValue, Input, Result, Specificity,
    Unresolved, WrapError, WrapOptions, wrap_with,
};

// =============================================================================
// Type Fixtures
// =============================================================================

pub const BYTES: BytesType = BytesType::Dynamic;
pub const BYTES2: BytesType = BytesType::fixed(2);
pub const BYTES4: BytesType = BytesType::fixed(4);

pub const UFIXED8X0: DecimalType = DecimalType::unsigned(8, 0);
pub const UFIXED8X1: DecimalType = DecimalType::unsigned(8, 1);
pub const FIXED8X1: DecimalType = DecimalType::signed(8, 1);
pub const UFIXED128X18: DecimalType = DecimalType::unsigned(128, 18);
pub const FIXED128X18: DecimalType = DecimalType::signed(128, 18);

// =============================================================================
// Helpers
// =============================================================================

/// Coerce to a bytes type with default options.
pub fn bytes(data_type: BytesType, input: &Input) -> Result<BytesValue> {
    wrap_with(&data_type, input, &WrapOptions::default(), &mut Unresolved)
}

/// Coerce to a fixed-point type, answering the resolver with "unrecognized".
pub fn decimal(data_type: DecimalType, input: &Input) -> Result<DecimalValue> {
    wrap_with(&data_type, input, &WrapOptions::default(), &mut Unresolved)
}

/// Coerce to a fixed-point type in loose mode.
pub fn decimal_loose(data_type: DecimalType, input: &Input) -> Result<DecimalValue> {
    wrap_with(
        &data_type,
        input,
        &WrapOptions::new().with_loose(true),
        &mut Unresolved,
    )
}

pub fn dec(text: &str) -> BigDecimal {
    text.parse().unwrap()
}

/// Assert that `result` is a type mismatch at `level`, returning its reason.
#[track_caller]
pub fn assert_mismatch<V: std::fmt::Debug>(result: Result<V>, level: Specificity) -> String {
    match result {
        Err(WrapError::TypeMismatch(mismatch)) => {
            assert_eq!(
                mismatch.specificity, level,
                "unexpected specificity for reason: {}",
                mismatch.reason
            );
            mismatch.reason
        }
        other => panic!("expected a type mismatch, got {other:?}"),
    }
}
