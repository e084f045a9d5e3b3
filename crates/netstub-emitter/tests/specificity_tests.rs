use crate::SpecificityCache;
use crate::test_support::load;
use netstub_model::{LoadedModel, MethodId, well_known};
use serde_json::json;
use std::cmp::Ordering;

fn fixture() -> LoadedModel {
    load([json!({
        "name": "Acme",
        "types": [
            { "name": "Acme.Base" },
            { "name": "Acme.Derived", "base": "Acme.Base" },
            {
                "name": "Acme.Comparer",
                "methods": [
                    { "name": "Compare", "parameters": [{ "name": "x", "type": "Acme.Base" }] },
                    { "name": "Compare", "parameters": [{ "name": "x", "type": "Acme.Derived" }] },
                    { "name": "Compare", "parameters": [{ "name": "x", "type": "Acme.Derived" }, { "name": "y", "type": "Acme.Derived" }] },
                    { "name": "Foo", "parameters": [{ "name": "c", "type": "System.Char" }] },
                    { "name": "Foo", "parameters": [{ "name": "s", "type": "System.String" }] }
                ]
            }
        ]
    })])
}

fn methods(model: &LoadedModel) -> Vec<MethodId> {
    let comparer = model.universe.lookup("Acme.Comparer").expect("comparer");
    model.universe.definition(comparer).expect("definition").methods.clone()
}

#[test]
fn derived_types_are_deeper() {
    let model = fixture();
    let universe = &model.universe;
    let mut cache = SpecificityCache::new();
    let object = universe.lookup(well_known::OBJECT).expect("object");
    let base = universe.lookup("Acme.Base").expect("base");
    let derived = universe.lookup("Acme.Derived").expect("derived");

    assert_eq!(cache.depth(universe, object), 1);
    assert_eq!(cache.depth(universe, base), 2);
    assert_eq!(cache.depth(universe, derived), 3);
}

#[test]
fn more_specific_parameter_sorts_first() {
    let model = fixture();
    let universe = &model.universe;
    let mut cache = SpecificityCache::new();
    let all = methods(&model);
    let (by_base, by_derived, two_args) = (
        universe.method(all[0]),
        universe.method(all[1]),
        universe.method(all[2]),
    );

    assert_eq!(cache.compare_members(universe, by_derived, by_base), Ordering::Less);
    assert_eq!(cache.compare_members(universe, by_base, by_derived), Ordering::Greater);
    assert_eq!(
        cache.compare_members(universe, by_derived, two_args),
        Ordering::Less,
        "Fewer parameters should sort first"
    );
}

#[test]
fn char_and_string_never_decide_the_order() {
    let model = fixture();
    let universe = &model.universe;
    let mut cache = SpecificityCache::new();
    let char_ty = universe.lookup(well_known::CHAR).expect("char");
    let string_ty = universe.lookup(well_known::STRING).expect("string");
    assert_eq!(
        cache.specificity(universe, char_ty),
        cache.specificity(universe, string_ty)
    );

    let all = methods(&model);
    let (by_char, by_string) = (universe.method(all[3]), universe.method(all[4]));
    assert_eq!(
        cache.compare_members(universe, by_char, by_string),
        Ordering::Less,
        "Equal keys fall back to parameter names"
    );
}

#[test]
fn comparator_is_antisymmetric_over_a_member_set() {
    let model = fixture();
    let universe = &model.universe;
    let mut cache = SpecificityCache::new();
    let all = methods(&model);
    for &a in &all {
        for &b in &all {
            let forward = cache.compare_members(universe, universe.method(a), universe.method(b));
            let backward = cache.compare_members(universe, universe.method(b), universe.method(a));
            assert_eq!(forward, backward.reverse());
        }
    }
}
