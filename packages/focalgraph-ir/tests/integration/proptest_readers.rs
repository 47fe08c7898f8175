//! Property-based tests for the IR readers
//!
//! Generated types, values and instruction lines must read back to the text
//! they came from; arbitrary input must never panic.

use focalgraph_ir::features::ir_parsing::infrastructure::{read_type, read_typed_value};
use focalgraph_ir::features::ir_parsing::{
    logical_lines, parse_instruction, LogicalLine, ModuleSource, SourceLine, Statement,
    TokenStream,
};
use proptest::prelude::*;

// Strategy for first-class types in canonical spacing
fn ir_type() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (1u32..=128).prop_map(|bits| format!("i{bits}")),
        Just("float".to_string()),
        Just("double".to_string()),
        Just("ptr".to_string()),
        "[a-z][a-z0-9_]{0,8}".prop_map(|name| format!("%struct.{name}")),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(|ty| format!("{ty}*")),
            (1usize..64, inner.clone()).prop_map(|(n, ty)| format!("[{n} x {ty}]")),
            (1usize..16, inner.clone()).prop_map(|(n, ty)| format!("<{n} x {ty}>")),
            prop::collection::vec(inner, 1..4)
                .prop_map(|fields| format!("{{ {} }}", fields.join(", "))),
        ]
    })
}

// Strategy for local registers, numbered or named
fn register() -> impl Strategy<Value = String> {
    prop_oneof![
        (0usize..10_000).prop_map(|n| format!("%{n}")),
        "[a-z_][a-z0-9_.]{0,12}".prop_map(|name| format!("%{name}")),
    ]
}

// Strategy for values a typed operand may carry
fn simple_value() -> impl Strategy<Value = String> {
    prop_oneof![
        register(),
        (-100_000i64..100_000).prop_map(|n| n.to_string()),
        Just("null".to_string()),
        Just("undef".to_string()),
        Just("zeroinitializer".to_string()),
    ]
}

// Strategy for a body made of labels and simple instructions
fn body_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            (1usize..500).prop_map(|n| format!("{n}:")),
            (register(), register())
                .prop_map(|(a, b)| format!("  {a} = load i32, ptr {b}, align 4")),
            (register(), register()).prop_map(|(v, p)| format!("  store i32 {v}, ptr {p}")),
        ],
        0..20,
    )
}

proptest! {
    #[test]
    fn test_type_reads_back(ty in ir_type()) {
        let mut ts = TokenStream::new(&ty).unwrap();
        prop_assert_eq!(read_type(&mut ts).unwrap(), ty.as_str());
        prop_assert!(ts.is_empty());
    }

    #[test]
    fn test_typed_value_reads_back(ty in ir_type(), value in simple_value()) {
        let text = format!("{ty} {value}");
        let mut ts = TokenStream::new(&text).unwrap();
        let (read_ty, read_val) = read_typed_value(&mut ts).unwrap();
        prop_assert_eq!(read_ty, ty);
        prop_assert_eq!(read_val, value);
    }

    #[test]
    fn test_load_records_address(dst in register(), src in register(), ty in ir_type()) {
        let line = format!("{dst} = load {ty}, ptr {src}, align 8");
        let parsed = parse_instruction(&line).unwrap();
        prop_assert_eq!(parsed.assignee.as_deref(), Some(dst.as_str()));
        match parsed.statement {
            Some(Statement::Load { ty: read_ty, address, .. }) => {
                prop_assert_eq!(read_ty, ty);
                prop_assert_eq!(address, src);
            }
            other => prop_assert!(false, "expected load, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_instruction_never_panics(line in "\\PC{0,120}") {
        let _ = parse_instruction(&line);
    }

    #[test]
    fn test_split_never_panics(text in "(\\PC{0,40}\n){0,20}") {
        let module = ModuleSource::split(&text);
        prop_assert!(module.functions.len() <= text.lines().count());
    }

    #[test]
    fn test_split_counts_defines(count in 0usize..12) {
        let text: String = (0..count)
            .map(|i| format!("define void @f{i}() {{\n  ret void\n}}\n\n"))
            .collect();
        let module = ModuleSource::split(&text);
        prop_assert_eq!(module.functions.len(), count);
        for function in &module.functions {
            prop_assert_eq!(function.body.len(), 1);
        }
    }

    #[test]
    fn test_logical_lines_keep_labels(lines in body_lines()) {
        let body: Vec<SourceLine> = lines
            .iter()
            .enumerate()
            .map(|(i, text)| SourceLine { number: i + 1, text: text.clone() })
            .collect();
        let folded = logical_lines(&body);

        let labels = folded.iter().filter(|l| matches!(l, LogicalLine::Label(_))).count();
        let expected = lines.iter().filter(|l| l.ends_with(':')).count();
        prop_assert_eq!(labels, expected);
        prop_assert_eq!(folded.len(), lines.len());
    }
}
