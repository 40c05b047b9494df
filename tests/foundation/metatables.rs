//! Integration tests for the metatable bootstrap
//!
//! Tests the self-referential root and the per-kind default metatables.

use easy_foundation::{Arity, Kind, Metatables, Result, Table, Value, metatable_of};

fn noop(mt: &Metatables, _: &[Value]) -> Result<Value> {
    Ok(mt.make_nil())
}

/// Follows the metatable chain from `value` until it reaches `root`,
/// returning the number of steps, or `None` after `limit` steps.
fn steps_to_root(value: &Value, root: &Table, limit: usize) -> Option<usize> {
    let mut table = metatable_of(value);
    for step in 1..=limit {
        if table.ptr_eq(root) {
            return Some(step);
        }
        table = table.metatable();
    }
    None
}

// =============================================================================
// Root Metatable
// =============================================================================

#[test]
fn root_metatable_is_its_own_metatable() {
    let mt = Metatables::bootstrap();
    let root = Value::Table(mt.root().clone());
    assert!(metatable_of(&root).ptr_eq(mt.root()));
    assert!(mt.root().is_root());
}

#[test]
fn root_chain_is_a_cycle_of_length_one() {
    let mt = Metatables::bootstrap();
    let mut table = mt.root().clone();
    for _ in 0..10 {
        table = table.metatable();
        assert!(table.ptr_eq(mt.root()));
    }
}

// =============================================================================
// Default Metatables
// =============================================================================

#[test]
fn primitive_values_reach_root_in_two_steps() {
    let mt = Metatables::bootstrap();
    let values = [
        mt.make_nil(),
        mt.make_boolean(false),
        mt.make_number(0.0),
        mt.make_string(""),
        mt.make_syntax_form("while"),
        mt.make_function("noop", Arity::Exact(0), noop),
    ];
    for value in &values {
        assert_eq!(steps_to_root(value, mt.root(), 5), Some(2), "{value:?}");
    }
}

#[test]
fn tables_reach_root_in_one_step() {
    let mt = Metatables::bootstrap();
    assert_eq!(steps_to_root(&mt.make_table(), mt.root(), 5), Some(1));
}

#[test]
fn table_with_custom_metatable_reaches_root_in_two_steps() {
    let mt = Metatables::bootstrap();
    let custom = mt.make_table();
    let value = mt.make_table_with_metatable(custom.as_table().unwrap().clone());
    assert_eq!(steps_to_root(&value, mt.root(), 5), Some(2));
}

#[test]
fn metatable_for_matches_constructed_values() {
    let mt = Metatables::bootstrap();
    assert!(metatable_of(&mt.make_nil()).ptr_eq(mt.metatable_for(Kind::Nil)));
    assert!(metatable_of(&mt.make_boolean(true)).ptr_eq(mt.metatable_for(Kind::Boolean)));
    assert!(metatable_of(&mt.make_number(1.0)).ptr_eq(mt.metatable_for(Kind::Number)));
    assert!(metatable_of(&mt.make_string("a")).ptr_eq(mt.metatable_for(Kind::String)));
    assert!(metatable_of(&mt.make_table()).ptr_eq(mt.metatable_for(Kind::Table)));
    assert!(metatable_of(&mt.make_syntax_form("if")).ptr_eq(mt.metatable_for(Kind::Form)));
}

#[test]
fn metatables_are_ordinary_tables() {
    let mt = Metatables::bootstrap();
    let number_meta = mt.metatable_for(Kind::Number);
    number_meta.set("__name", mt.make_string("number"));
    let value = mt.make_number(7.0);
    assert_eq!(
        metatable_of(&value).get("__name").as_ref().and_then(Value::as_str),
        Some("number")
    );
}

#[test]
fn registry_is_shared_across_threads() {
    let mt = Metatables::bootstrap();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let mt = mt.clone();
            std::thread::spawn(move || mt.make_number(f64::from(i)))
        })
        .collect();
    for handle in handles {
        let value = handle.join().unwrap();
        assert!(metatable_of(&value).ptr_eq(mt.metatable_for(Kind::Number)));
    }
}
