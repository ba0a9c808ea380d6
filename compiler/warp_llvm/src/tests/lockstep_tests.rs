//! The `warp_abi` tables against the linked `llvm-sys` enums.

use std::panic::{catch_unwind, AssertUnwindSafe};

use pretty_assertions::assert_eq;
use warp_abi::{
    AbiMismatch, AtomicOrdering, AtomicRmwBinOp, CallConv, CodecError, DiagnosticSeverity,
    DllStorageClass, EnumDomain, InlineAsmDialect, IntPredicate, Linkage, ModuleFlagBehavior,
    Opcode, RealPredicate, TailCallKind, TypeKind, UnnamedAddr, ValueKind, Visibility,
};

use crate::native::{
    llvm_variants, warp_call_conv_from_int, warp_call_conv_to_int, warp_opcode_from_int,
    warp_opcode_to_int, warp_type_kind_from_int, warp_type_kind_to_int, LlvmEnum,
};

fn assert_lockstep<D: LlvmEnum>() {
    let mut seen = 0;
    for (variant, raw) in llvm_variants::<D>() {
        assert_eq!(
            D::llvm_value(raw),
            variant.native(),
            "{} {} has drifted from llvm-sys",
            D::DOMAIN,
            variant.name()
        );
        assert_eq!(D::from_llvm(raw), variant);
        assert_eq!(D::encode_llvm(raw), variant.code());
        seen += 1;
    }
    assert_eq!(seen, D::cardinality(), "{}", D::DOMAIN);
}

#[test]
fn every_domain_matches_llvm_sys() {
    assert_lockstep::<TypeKind>();
    assert_lockstep::<ValueKind>();
    assert_lockstep::<Opcode>();
    assert_lockstep::<IntPredicate>();
    assert_lockstep::<RealPredicate>();
    assert_lockstep::<TailCallKind>();
    assert_lockstep::<Linkage>();
    assert_lockstep::<Visibility>();
    assert_lockstep::<UnnamedAddr>();
    assert_lockstep::<DllStorageClass>();
    assert_lockstep::<CallConv>();
    assert_lockstep::<AtomicOrdering>();
    assert_lockstep::<AtomicRmwBinOp>();
    assert_lockstep::<ModuleFlagBehavior>();
    assert_lockstep::<DiagnosticSeverity>();
    assert_lockstep::<InlineAsmDialect>();
}

#[test]
fn host_pairs_use_codes_not_machine_values() {
    let integer = llvm_sys::LLVMTypeKind::LLVMIntegerTypeKind as u32;
    assert_eq!(warp_type_kind_to_int(integer), 8);
    assert_eq!(warp_type_kind_from_int(8), integer);

    let unreachable = llvm_sys::LLVMOpcode::LLVMUnreachable as u32;
    assert_eq!(warp_opcode_to_int(unreachable), 5);
    assert_eq!(warp_opcode_from_int(5), unreachable);

    let swift = llvm_sys::LLVMCallConv::LLVMSwiftCallConv as u32;
    let code = warp_call_conv_to_int(swift);
    assert_eq!(code, CallConv::Swift.code());
    assert_eq!(warp_call_conv_from_int(code), swift);
}

#[test]
fn decode_llvm_rejects_codes_past_the_table() {
    let payload = catch_unwind(AssertUnwindSafe(|| TypeKind::decode_llvm(100))).unwrap_err();
    let mismatch = payload.downcast::<AbiMismatch>().unwrap();
    assert_eq!(mismatch.operation, "decode");
    assert_eq!(
        mismatch.error,
        CodecError::CodeOutOfRange {
            domain: "type-kind",
            code: 100,
            cardinality: 21,
        }
    );
}
