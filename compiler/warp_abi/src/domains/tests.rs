use std::collections::HashSet;

use pretty_assertions::assert_eq;

use super::*;
use crate::codec::EnumDomain;

/// Names of every domain, in the order the tables are declared.
const DOMAIN_NAMES: [&str; 16] = [
    "type-kind",
    "value-kind",
    "opcode",
    "int-predicate",
    "real-predicate",
    "tail-call-kind",
    "linkage",
    "visibility",
    "unnamed-addr",
    "dll-storage-class",
    "calling-convention",
    "atomic-ordering",
    "atomic-rmw-binop",
    "module-flag-behavior",
    "diagnostic-severity",
    "inline-asm-dialect",
];

/// Check that codes are exactly `0..N` in `ALL` order and that both tables
/// are injective and round-trip.
fn assert_table<D: EnumDomain>(cardinality: usize) {
    assert_eq!(D::cardinality(), cardinality, "{} cardinality", D::DOMAIN);

    let mut natives = HashSet::new();
    for (index, &variant) in D::ALL.iter().enumerate() {
        let code = variant.code();
        assert_eq!(usize::try_from(code).ok(), Some(index), "{variant:?} code");
        assert_eq!(D::from_code(code), Ok(variant));
        assert_eq!(D::from_native(variant.native()), Ok(variant));
        assert_eq!(D::encode_native(variant.native()), code);
        assert_eq!(D::decode_native(code), variant.native());
        assert!(
            natives.insert(variant.native()),
            "{} native {} repeated",
            D::DOMAIN,
            variant.native()
        );
    }

    let past_end = i32::try_from(cardinality).unwrap_or(i32::MAX);
    assert!(D::from_code(past_end).is_err());
    assert!(D::from_code(-1).is_err());
}

#[test]
fn every_domain_table_is_a_bijection() {
    assert_table::<TypeKind>(21);
    assert_table::<ValueKind>(27);
    assert_table::<Opcode>(67);
    assert_table::<IntPredicate>(10);
    assert_table::<RealPredicate>(16);
    assert_table::<TailCallKind>(4);
    assert_table::<Linkage>(17);
    assert_table::<Visibility>(3);
    assert_table::<UnnamedAddr>(3);
    assert_table::<DllStorageClass>(3);
    assert_table::<CallConv>(41);
    assert_table::<AtomicOrdering>(7);
    assert_table::<AtomicRmwBinOp>(17);
    assert_table::<ModuleFlagBehavior>(6);
    assert_table::<DiagnosticSeverity>(4);
    assert_table::<InlineAsmDialect>(2);
}

#[test]
fn domain_names_are_listed_and_unique() {
    let declared = [
        TypeKind::DOMAIN,
        ValueKind::DOMAIN,
        Opcode::DOMAIN,
        IntPredicate::DOMAIN,
        RealPredicate::DOMAIN,
        TailCallKind::DOMAIN,
        Linkage::DOMAIN,
        Visibility::DOMAIN,
        UnnamedAddr::DOMAIN,
        DllStorageClass::DOMAIN,
        CallConv::DOMAIN,
        AtomicOrdering::DOMAIN,
        AtomicRmwBinOp::DOMAIN,
        ModuleFlagBehavior::DOMAIN,
        DiagnosticSeverity::DOMAIN,
        InlineAsmDialect::DOMAIN,
    ];
    assert_eq!(declared, DOMAIN_NAMES);
    let unique: HashSet<_> = DOMAIN_NAMES.iter().collect();
    assert_eq!(unique.len(), DOMAIN_NAMES.len());
}

#[test]
fn type_kind_integer_is_code_eight() {
    assert_eq!(TypeKind::Integer.encode(), 8);
    assert_eq!(TypeKind::decode(8), TypeKind::Integer);
    assert_eq!(TypeKind::Integer.native(), 8);
}

#[test]
fn unreachable_opcode_skips_retired_value() {
    assert_eq!(Opcode::Unreachable.encode(), 5);
    assert_eq!(Opcode::Unreachable.native(), 7);
    assert_eq!(Opcode::encode_native(7), 5);
    assert!(Opcode::from_native(6).is_err());
}

#[test]
fn opcodes_added_after_the_header_order() {
    assert_eq!(Opcode::CallBr.native(), 67);
    assert_eq!(Opcode::FNeg.native(), 66);
    assert_eq!(Opcode::AddrSpaceCast.native(), 60);
    assert_eq!(Opcode::Freeze.native(), 68);
    assert_eq!(Opcode::decode(66), Opcode::CatchSwitch);
}

#[test]
fn opcode_classes_are_disjoint() {
    for &op in Opcode::ALL {
        let classes = [op.is_terminator(), op.is_binary(), op.is_cast()];
        assert!(
            classes.iter().filter(|&&c| c).count() <= 1,
            "{op} is in more than one class"
        );
    }
    assert_eq!(Opcode::ALL.iter().filter(|op| op.is_binary()).count(), 18);
    assert_eq!(Opcode::ALL.iter().filter(|op| op.is_cast()).count(), 13);
}

#[test]
fn int_predicates_start_at_thirty_two() {
    assert_eq!(IntPredicate::Eq.native(), 32);
    assert_eq!(IntPredicate::Sle.native(), 41);
    assert_eq!(IntPredicate::Eq.encode(), 0);
    assert!(IntPredicate::from_native(0).is_err());
}

#[test]
fn atomic_ordering_skips_consume() {
    assert!(AtomicOrdering::from_native(3).is_err());
    assert_eq!(AtomicOrdering::Acquire.native(), 4);
    assert_eq!(AtomicOrdering::SequentiallyConsistent.encode(), 6);
    assert!(!AtomicOrdering::NotAtomic.is_atomic());
    assert!(AtomicOrdering::Monotonic.is_atomic());
}

#[test]
fn calling_convention_natives_are_sparse() {
    assert_eq!(CallConv::C.native(), 0);
    assert_eq!(CallConv::Fast.native(), 8);
    assert_eq!(CallConv::X86Stdcall.native(), 64);
    assert_eq!(CallConv::AmdGpuEs.native(), 96);
    assert!(CallConv::from_native(12).is_err());
    assert!(CallConv::from_native(73).is_err());
}

#[test]
fn display_prints_variant_name() {
    assert_eq!(Linkage::LinkOnceOdr.to_string(), "LinkOnceOdr");
    assert_eq!(CallConv::X8664SysV.to_string(), "X8664SysV");
    assert_eq!(TailCallKind::MustTail.to_string(), "MustTail");
}

#[test]
fn std_conversions_follow_codes() {
    assert_eq!(Visibility::try_from(1), Ok(Visibility::Hidden));
    assert!(Visibility::try_from(3).is_err());
    assert_eq!(i32::from(DllStorageClass::Export), 2);
}
